/// Builds a [`Record`](crate::Record) from `name => value` pairs, keeping the
/// order in which the fields are written.
///
/// ```
/// let record = tablekit_core::record! {
///     "id" => 1,
///     "name" => "John",
/// };
/// assert_eq!(record.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    (
        $( $name:expr => $value:expr ),+ $(,)?
    ) => {
        $crate::Record::new() $( .with($name, $value) )+
    };
}
