mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any kind of struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use simp_attrs::ErrorKind;
/// use simp_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "division by a symbol", labels = ["this divisor"])]
/// pub struct Foo;
///
/// let report = Foo.build_report("expr", &[0..1]);
/// # let _ = report;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The text of each label, paired in order with the spans of the error.         |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. `message` and `help` should evaluate to something that
/// implements [`ToString`], and `labels` to something iterable over such values. The expressions
/// are evaluated with `self` in scope, and for structs with named fields, with each field bound to
/// a local of the same name (tuple structs are not supported).
///
/// [`ErrorKind`]: https://docs.rs/simp-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            #target
        }
    }.into()
}
