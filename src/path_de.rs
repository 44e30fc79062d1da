use serde::de::DeserializeOwned;

use crate::error::IrError;
use crate::ir::IrDocument;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, IrError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(decode_error)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, IrError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(decode_error)
}

pub fn document_from_str(src: &str) -> Result<IrDocument, IrError> {
    from_str_with_path(src)
}

fn decode_error(err: serde_path_to_error::Error<serde_json::Error>) -> IrError {
    IrError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}
