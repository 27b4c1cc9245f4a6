/*!
Leaf containers used to build automata.

Every container here charges its storage against an [`Arena`](arena::Arena)
and is never shrunk. All of it is released at once when its owner is dropped.
*/

pub mod arena;
pub mod fnv;
pub mod id;
pub mod map;
pub mod seq;
pub mod set;
