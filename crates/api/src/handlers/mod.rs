pub mod bug_treatment;
pub mod harvest;
pub mod location;
pub mod plant;
pub mod relationship;
pub mod vegetable;
