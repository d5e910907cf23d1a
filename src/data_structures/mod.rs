pub mod priority_queue;
pub mod soft_heap;

pub use priority_queue::BinaryHeapWrapper;
pub use soft_heap::SoftHeap;
