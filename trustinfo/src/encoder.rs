/// Encoder trait for converting `T` (usually `Self`) into `E`.
///
/// The reverse of [`crate::decoder::Decoder`]. The output type must
/// implement `EncodableTo<T>`.
pub trait Encoder<T, E: EncodableTo<T>> {
    type Error;

    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that `Self` can be produced by encoding `T`.
pub trait EncodableTo<T> {}
