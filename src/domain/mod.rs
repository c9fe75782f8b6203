// Domain layer - Core types and placement rules

pub mod model;
pub mod timing;
