/// Helper macro to provide implementations of operator traits
///
/// Implements the operator for all four combinations of owned/borrowed operands.
/// The body receives owned copies of both operands, bound to the given names.
///
/// Generic parameters go inside the braces, e.g. `impl {const N: usize} core::ops::Add : ...`
#[macro_export]
macro_rules! impl_op {
    (impl $({$($bounds:tt)*})? $($operator:ident)::+ : fn $fn_name:ident ($a:ident : $a_ty:ty, $b:ident : $b_ty:ty) -> $ret_ty:ty $body:block) => {
        $crate::impl_op!(@inner impl $({$($bounds)*})? $($operator)::+ : fn $fn_name ($a:  $a_ty, $b:  $b_ty) -> $ret_ty $body);
        $crate::impl_op!(@inner impl $({$($bounds)*})? $($operator)::+ : fn $fn_name ($a:  $a_ty, $b: &$b_ty) -> $ret_ty $body);
        $crate::impl_op!(@inner impl $({$($bounds)*})? $($operator)::+ : fn $fn_name ($a: &$a_ty, $b:  $b_ty) -> $ret_ty $body);
        $crate::impl_op!(@inner impl $({$($bounds)*})? $($operator)::+ : fn $fn_name ($a: &$a_ty, $b: &$b_ty) -> $ret_ty $body);
    };

    (@inner impl $({$($bounds:tt)*})? $($operator:ident)::+ : fn $fn_name:ident ($a:ident : $a_ty:ty, $b:ident : $b_ty:ty) -> $ret_ty:ty $body:block) => {
        impl $(<$($bounds)*>)? $($operator)::+<$b_ty> for $a_ty {
            type Output = $ret_ty;

            fn $fn_name(self, rhs: $b_ty) -> Self::Output {
                // Cloning is the easiest way to ensure that we get a owned value, from either a reference or owned val
                #[allow(unused_mut, clippy::clone_on_copy)]
                let (mut $a, $b) = (self.clone(), rhs.clone());
                $body
            }
        }
    };
}

/// See [impl_op]
#[macro_export]
macro_rules! impl_op_assign {
    (impl $({$($bounds:tt)*})? $($operator:ident)::+ : fn $fn_name:ident ($a:ident : $a_ty:ty, $b:ident : $b_ty:ty) $body:block) => {
        $crate::impl_op_assign!(@inner impl $({$($bounds)*})? $($operator)::+ : fn $fn_name ($a: $a_ty, $b:  $b_ty) $body);
        $crate::impl_op_assign!(@inner impl $({$($bounds)*})? $($operator)::+ : fn $fn_name ($a: $a_ty, $b: &$b_ty) $body);
    };

    (@inner impl $({$($bounds:tt)*})? $($operator:ident)::+ : fn $fn_name:ident ($a:ident : $lhs:ty, $b:ident : $rhs:ty) $body:block) => {
        impl $(<$($bounds)*>)? $($operator)::+<$rhs> for $lhs {
            fn $fn_name(&mut self, rhs: $rhs) {
                #[allow(unused_mut, clippy::clone_on_copy)]
                let (mut $a, $b) = (self.clone(), rhs.clone());
                $body;
                *self = $a;
            }
        }
    };
}

/// Forwards element-wise functions (`abs()`, `clamp(min, max)`, ...) through a type's `map()` method
#[macro_export]
macro_rules! forward_fn {
    ( $(

        impl $({$($bounds:tt)*})? $type:ty {$(
            $fn:ident($( $arg_name:ident : $arg_type:ty),*) $(,)? );*
        $(;)? }

    )* ) =>

    {$(

        impl $(<$($bounds)*>)? $type { $(
            pub fn $fn (&self, $( $arg_name : $arg_type ),* ) -> Self {
                self.map(|c| c.$fn( $($arg_name),* ))
            }
        )* }

    )* };
}
