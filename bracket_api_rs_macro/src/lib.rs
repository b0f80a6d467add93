pub trait IdentifiableDocument {
    fn get_id_value(&self) -> String;
}
