
use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct FunctionFlags: u32 {
    /// Functions with this flag set produce a real value whenever all
    /// of their arguments are real. `sin`, `cos` and `exp` have this
    /// property, while `log` does not (it is complex for negative
    /// arguments).
    const REAL_ON_REAL_ARGS = 0b0001;
    /// Functions with this flag set always produce a real value,
    /// regardless of their arguments. `re` and `im` have this
    /// property.
    const ALWAYS_REAL = 0b0010;
  }
}
