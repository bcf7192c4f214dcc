/// Rounds `x` toward negative infinity to a multiple of `power`, which must be a power of 2.
#[inline]
pub fn round_down_multiple_of_pow2(x: i32, power: i32) -> i32 {
    debug_assert!(power > 0 && (power as u32).is_power_of_two());

    x & -power
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
