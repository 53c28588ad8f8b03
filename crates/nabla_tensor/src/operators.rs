use crate::Tensor;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_tensor_op {
    ($trait:ident, $method:ident) => {
        impl $trait<&Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, rhs: &Tensor) -> Self::Output {
                Tensor::$method(self, rhs).unwrap()
            }
        }

        impl $trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, rhs: Tensor) -> Self::Output {
                Tensor::$method(self, &rhs).unwrap()
            }
        }

        impl $trait<&Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, rhs: &Tensor) -> Self::Output {
                Tensor::$method(&self, rhs).unwrap()
            }
        }

        impl $trait<Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, rhs: Tensor) -> Self::Output {
                Tensor::$method(&self, &rhs).unwrap()
            }
        }
    };
}

impl_tensor_op!(Add, add);
impl_tensor_op!(Sub, sub);
impl_tensor_op!(Mul, mul);
impl_tensor_op!(Div, div);

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $scalar_method:ident, [$($t:ty),*]) => {
        $(
            impl $trait<$t> for &Tensor {
                type Output = Tensor;

                fn $method(self, rhs: $t) -> Self::Output {
                    Tensor::$scalar_method(self, rhs).unwrap()
                }
            }

            impl $trait<$t> for Tensor {
                type Output = Tensor;

                fn $method(self, rhs: $t) -> Self::Output {
                    Tensor::$scalar_method(&self, rhs).unwrap()
                }
            }
        )*
    };
}

impl_scalar_op!(Add, add, add_scalar, [f32, f64]);
impl_scalar_op!(Sub, sub, sub_scalar, [f32, f64]);
impl_scalar_op!(Mul, mul, mul_scalar, [f32, f64]);
impl_scalar_op!(Div, div, div_scalar, [f32, f64]);

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(self).unwrap()
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(&self).unwrap()
    }
}
