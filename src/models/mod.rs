pub mod form;
pub mod search;
pub mod travel;
