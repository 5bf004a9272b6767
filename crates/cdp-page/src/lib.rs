pub mod browser;
pub mod page;

mod js;

pub use browser::CdpBrowser;
pub use page::CdpPage;
