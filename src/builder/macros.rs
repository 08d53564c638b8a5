//! Macros for ergonomic liquid setup.

/// Build a [`Composition`](crate::core::Composition) from ingredient/volume pairs.
///
/// # Example
///
/// ```
/// use stepgen::composition;
///
/// let contents = composition! {
///     "buffer" => 150.0,
///     "dye" => 50.0,
/// };
///
/// assert_eq!(contents.total_volume(), 200.0);
/// assert_eq!(contents.volume_of("dye"), 50.0);
/// ```
#[macro_export]
macro_rules! composition {
    () => {
        $crate::core::Composition::new()
    };
    ( $( $ingredient:expr => $volume:expr ),+ $(,)? ) => {
        $crate::core::Composition::new()
            $( .with_ingredient($ingredient, $volume) )+
    };
}
