//! HTTP handlers for all API routes.

pub mod evidence;
pub mod pathway;
pub mod system;
