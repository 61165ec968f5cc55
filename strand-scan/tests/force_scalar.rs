//! Pinning the kernel to the scalar level must stick for the process.

use strand_scan::{force_level, level, Kernel, Level};

#[test]
fn scalar_pin_wins_the_race_to_first_use() {
    assert!(force_level(Level::Scalar));
    assert_eq!(level(), Level::Scalar);
    assert_eq!(Kernel::current().width(), 0);
    // A second pin is refused once the record is set.
    assert!(!force_level(Level::Sse2));
    assert_eq!(level(), Level::Scalar);
}
