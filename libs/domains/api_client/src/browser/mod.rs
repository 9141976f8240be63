mod chromium;
mod launcher;

pub use chromium::{ChromiumHandle, ChromiumLauncher};
pub use launcher::{BrowserHandle, BrowserLauncher};

#[cfg(test)]
pub use launcher::MockBrowserLauncher;
