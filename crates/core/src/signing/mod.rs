pub mod oauth1;
pub mod percent;

pub use oauth1::RequestSigner;
pub use percent::percent_encode;
