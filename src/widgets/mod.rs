//! Server-rendered versions of the site's browser widgets.

pub mod calendar;
pub mod header;
