pub mod game_info;
pub mod package_id;
pub mod resolve_response;

pub use game_info::{GameInfo, RawAppData, FREE_PRICE, UNKNOWN_DEVELOPER, UNKNOWN_PRICE};
pub use package_id::extract_package_id;
pub use resolve_response::{ResolveResponse, ResolveSource};
