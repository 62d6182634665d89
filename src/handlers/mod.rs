pub mod helpers;
pub mod canvas;
pub mod documents;
pub mod instances;
pub mod query;
