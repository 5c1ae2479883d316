use crate::Result;
use url::Url;

/// Listing page URLs for one profile
///
/// Page 1 is addressed through the `perpage/<size>/` form, which also makes
/// the site remember the page size for the following `page/<n>/` requests.
#[derive(Debug, Clone)]
pub struct ProfileUrls {
    list_root: Url,
    page_size: u32,
}

impl ProfileUrls {
    /// Builds the URLs for `user_id` under `base_url`
    ///
    /// `user_id` is expected to have been validated already.
    pub fn new(base_url: &str, user_id: &str, page_size: u32) -> Result<Self> {
        let list_root = Url::parse(&format!(
            "{}/user/{}/votes/list/vs/novote/",
            base_url.trim_end_matches('/'),
            user_id
        ))?;

        Ok(Self {
            list_root,
            page_size,
        })
    }

    /// The page that fixes the page size; also the first listing page
    pub fn first_page(&self) -> Result<Url> {
        Ok(self
            .list_root
            .join(&format!("perpage/{}/", self.page_size))?)
    }

    /// The `page`-th listing page, counting from 1
    pub fn page(&self, page: u64) -> Result<Url> {
        if page <= 1 {
            return self.first_page();
        }

        Ok(self.list_root.join(&format!("page/{}/", page))?)
    }
}
