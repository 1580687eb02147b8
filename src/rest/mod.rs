pub mod converter;
pub mod featuretypes;
pub mod persister;
pub mod wrapper;

pub use converter::PersisterMessageConverter;
pub use persister::{Persister, PersisterFormat};
pub use wrapper::{BufferedMessage, HttpInputMessage, RestController, RestInputWrapper};
