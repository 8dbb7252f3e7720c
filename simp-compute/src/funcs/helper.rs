/// Build builtin functions that take a single argument.
macro_rules! build_unary {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    // NOTE: the closure call is contained within the macro, so we allow
                    // the clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            impl $crate::builtin::Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> usize {
                    1
                }

                fn eval(&self, args: &[f64]) -> f64 {
                    Self::eval_static(args[0])
                }
            }
        )*
    };
}

/// Build builtin functions that take two arguments.
macro_rules! build_binary {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(a: f64, b: f64) -> f64 {
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(a, b)
                }
            }

            impl $crate::builtin::Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn arity(&self) -> usize {
                    2
                }

                fn eval(&self, args: &[f64]) -> f64 {
                    Self::eval_static(args[0], args[1])
                }
            }
        )*
    };
}
