pub mod prelude;

pub mod anime;
