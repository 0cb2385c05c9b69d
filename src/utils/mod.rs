//! Utility functions for image processing
//!
//! This module provides helpers shared by the detectors:
//! - Grayscale conversion (RGBA to BT.601 luminance)
//! - Memory pools (buffer reuse across frames)

pub mod grayscale;
pub mod memory_pool;
