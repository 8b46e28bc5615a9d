//! Fallible reservation
//!
//! Every slot and payload buffer in the model grows through these two
//! functions. Test builds can arm a failure on the current thread so the
//! allocation-error paths run without exhausting memory.

use std::collections::TryReserveError;

pub(crate) fn reserve<T>(buf: &mut Vec<T>, additional: usize) -> Result<(), TryReserveError> {
    #[cfg(test)]
    fail::check()?;
    buf.try_reserve(additional)
}

pub(crate) fn reserve_exact<T>(buf: &mut Vec<T>, additional: usize) -> Result<(), TryReserveError> {
    #[cfg(test)]
    fail::check()?;
    buf.try_reserve_exact(additional)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_grows_buffer() {
        let mut buf: Vec<u32> = Vec::new();
        reserve(&mut buf, 4).unwrap();
        assert!(buf.capacity() >= 4);
        reserve_exact(&mut buf, 8).unwrap();
        assert!(buf.capacity() >= 8);
    }

    #[test]
    fn test_armed_failure_fires_once() {
        let mut buf: Vec<u8> = Vec::new();
        fail::after(1);
        assert!(reserve(&mut buf, 1).is_ok());
        assert!(reserve_exact(&mut buf, 1).is_err());
        assert!(reserve(&mut buf, 1).is_ok());
    }

    #[test]
    fn test_disarm_clears_pending_failure() {
        let mut buf: Vec<u8> = Vec::new();
        fail::after(0);
        fail::disarm();
        assert!(reserve(&mut buf, 1).is_ok());
    }
}
