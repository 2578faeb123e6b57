/// Generates a getter/setter pair for a single-bit flag.
///
/// The getter reads the chip; the setter goes through `set_bits`, so shadowed
/// flags need a sync before they take effect.
macro_rules! impl_flag {
    ($(#[$meta:meta])* $name:ident, $reg:expr, $mask:expr) => {
        paste::paste! {
            $(#[$meta])*
            #[inline]
            pub fn $name(&mut self) -> Result<bool, Error<SPI::Error>> {
                Ok(self.read($reg)? & $mask != 0)
            }

            #[doc = "Sets or clears the flag reported by [`" $name "`](Self::" $name ")."]
            #[inline]
            pub fn [<set_ $name>](&mut self, on: bool) -> Result<(), Error<SPI::Error>> {
                self.set_bits($reg, if on { $mask } else { 0 }, $mask)
            }
        }
    };
}

/// Generates a getter/setter pair for a multi-bit field with a valid range.
///
/// `$field` is the field helper from [`regs`](crate::regs) that shifts a
/// value into position; `$shift` undoes it on read.
macro_rules! impl_field {
    ($(#[$meta:meta])* $name:ident: $ty:ty, $reg:expr, $field:expr, $shift:literal, $range:expr) => {
        paste::paste! {
            $(#[$meta])*
            #[inline]
            pub fn $name(&mut self) -> Result<$ty, Error<SPI::Error>> {
                Ok(((self.read($reg)? & ($field)(!0)) >> $shift) as $ty)
            }

            #[doc = "Sets the field reported by [`" $name "`](Self::" $name ")."]
            #[doc = ""]
            #[doc = "# Errors"]
            #[doc = "[`Error::InvalidArgument`] if `value` is outside the documented range."]
            #[inline]
            pub fn [<set_ $name>](&mut self, value: $ty) -> Result<(), Error<SPI::Error>> {
                if !($range).contains(&value) {
                    return Err(Error::InvalidArgument);
                }
                self.set_bits($reg, ($field)(value as u32), ($field)(!0))
            }
        }
    };
}

pub(super) use impl_field;
pub(super) use impl_flag;
