use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Типизированный идентификатор агрегата (категории, подкатегории, товара).
///
/// Строковая форма используется в `<select>` и в DTO формы.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}
