use crate::upload::{Alert, NavigationTarget, Navigator};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::io;
use tracing::debug;
use url::Url;

/// Opens results pages in the system browser, resolved against the service
/// base URL the same way a page-relative link would be.
pub struct BrowserNavigator {
    base: Url,
}

impl BrowserNavigator {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn resolve(&self, target: &NavigationTarget) -> Result<Url, url::ParseError> {
        self.base.join(target.as_str())
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, target: &NavigationTarget) -> io::Result<()> {
        let url = self
            .resolve(target)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        debug!(%url, "launching browser");
        open::that(url.as_str())
    }
}

pub struct DialogAlert;

impl Alert for DialogAlert {
    fn alert(&self, message: &str) {
        let _ = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Ino Uploader")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
