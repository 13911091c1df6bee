mod envelope;
pub use envelope::*;

mod movie;
pub use movie::*;

mod theater;
pub use theater::*;
