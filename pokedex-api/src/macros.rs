//! Utility macros for reducing boilerplate

/// Macro to implement `FromRef<AppState>` for state extractors.
///
/// Lets handlers extract a single field of [`AppState`](crate::state::AppState)
/// with `State<T>`.
///
/// # Example
/// ```ignore
/// impl_from_ref!(NameIndexService, index);
/// // Expands to:
/// impl axum::extract::FromRef<AppState> for NameIndexService {
///     fn from_ref(state: &AppState) -> Self {
///         state.index.clone()
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_from_ref {
    ($type:ty, $field:ident) => {
        impl axum::extract::FromRef<$crate::state::AppState> for $type {
            fn from_ref(state: &$crate::state::AppState) -> Self {
                state.$field.clone()
            }
        }
    };
}
