// Admin-side project management: creation with candidate thumbnails, listing, token lookup.

pub mod handlers;
pub mod validation;
