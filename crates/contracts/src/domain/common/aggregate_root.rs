/// Корень агрегата, хранимый отдельной коллекцией
pub trait AggregateRoot {
    /// Имя коллекции; одновременно ключ снимка в хранилище (например, "items")
    fn collection_name() -> &'static str;
}
