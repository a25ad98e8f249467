pub mod http;
pub use http::{BackendClient, ForwardedResponse};
pub mod resources;
pub use resources::{Resource, ResourceApi};
