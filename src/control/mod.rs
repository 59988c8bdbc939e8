pub mod design;
pub mod environment;
pub mod propulsion;
pub mod spaces;
