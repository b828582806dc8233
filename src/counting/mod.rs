// Counting core: zero/one tables, the parity index and the even/odd recursion

pub mod brute_force;
pub mod counter;
pub mod divide_conquer;
pub mod parity_index;
pub mod zero_one;

pub use brute_force::debug_brute_force;
pub use counter::{Counter, MemoCache};
pub use divide_conquer::divide_and_conquer_counts;
pub use parity_index::{ParityGroup, ParityIndex};
pub use zero_one::{zero_one_counts, ZeroOneTable};
