//! connector integration related const declarations

/// Header names used by connector requests
pub mod headers {
    /// `Accept`
    pub const ACCEPT: &str = "Accept";
    /// `Authorization`
    pub const AUTHORIZATION: &str = "Authorization";
    /// `Content-Type`
    pub const CONTENT_TYPE: &str = "Content-Type";
}
