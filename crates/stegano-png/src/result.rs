use crate::SteganoError;

pub type Result<E> = std::result::Result<E, SteganoError>;
