//! Heap accounting of `wordlzw`, with dhat.
//!
//! Each test lives in its own file, as only one dhat profiler can run per process.
