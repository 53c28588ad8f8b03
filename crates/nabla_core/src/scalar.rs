use half::{bf16, f16};

macro_rules! scalar_variants {
    (
        floats: [$($fvariant:ident => $ftype:ty),* $(,)?],
        ints: [$($ivariant:ident => $itype:ty),* $(,)?] $(,)?
    ) => {
        /// A single number passed to an operation: a scalar operand, an exponent
        /// or an axis index.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Scalar {
            $($fvariant($ftype),)*
            $($ivariant($itype),)*
        }

        impl Scalar {
            #[inline]
            pub fn new<T: Into<Self>>(value: T) -> Self {
                value.into()
            }

            #[inline]
            pub fn is_float(&self) -> bool {
                match self {
                    $(Self::$fvariant(_) => true,)*
                    $(Self::$ivariant(_) => false,)*
                }
            }

            #[inline]
            pub fn is_int(&self) -> bool {
                !self.is_float()
            }

            #[inline]
            pub fn as_f64(&self) -> f64 {
                match *self {
                    Self::BF16(x) => x.to_f64(),
                    Self::F16(x) => x.to_f64(),
                    Self::F32(x) => x as f64,
                    Self::F64(x) => x,
                    $(Self::$ivariant(x) => x as f64,)*
                }
            }

            /// Integer view of the scalar. Floats are truncated toward zero and
            /// values past `i64::MAX` saturate.
            #[inline]
            pub fn as_i64(&self) -> i64 {
                match *self {
                    $(Self::$ivariant(x) => i64::try_from(x).unwrap_or(i64::MAX),)*
                    _ => self.as_f64() as i64,
                }
            }

            #[inline]
            pub fn as_bf16(&self) -> bf16 {
                bf16::from_f64(self.as_f64())
            }

            #[inline]
            pub fn as_f16(&self) -> f16 {
                f16::from_f64(self.as_f64())
            }

            #[inline]
            pub fn as_f32(&self) -> f32 {
                self.as_f64() as f32
            }
        }

        $(
            impl From<$ftype> for Scalar {
                #[inline]
                fn from(x: $ftype) -> Self {
                    Self::$fvariant(x)
                }
            }
        )*

        $(
            impl From<$itype> for Scalar {
                #[inline]
                fn from(x: $itype) -> Self {
                    Self::$ivariant(x)
                }
            }
        )*
    };
}

scalar_variants! {
    floats: [BF16 => bf16, F16 => f16, F32 => f32, F64 => f64],
    ints: [I32 => i32, I64 => i64, U32 => u32, U64 => u64],
}

impl From<usize> for Scalar {
    #[inline]
    fn from(x: usize) -> Self {
        Self::U64(x as u64)
    }
}

impl From<isize> for Scalar {
    #[inline]
    fn from(x: isize) -> Self {
        Self::I64(x as i64)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BF16(x) => write!(f, "{}", x),
            Self::F16(x) => write!(f, "{}", x),
            Self::F32(x) => write!(f, "{}", x),
            Self::F64(x) => write!(f, "{}", x),
            Self::I32(x) => write!(f, "{}", x),
            Self::I64(x) => write!(f, "{}", x),
            Self::U32(x) => write!(f, "{}", x),
            Self::U64(x) => write!(f, "{}", x),
        }
    }
}
