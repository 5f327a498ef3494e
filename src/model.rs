use serde::{Deserialize, Deserializer};

pub mod passwork;

// Passwork sends `null` for blank fields as often as it omits them
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
