//! Admin authority and two-step ownership transfer

use crate::error::{AuthorizationError, Result};
use factory_types::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminGate {
    admin: Address,
    future_admin: Option<Address>,
    fee_receiver: Address,
}

impl AdminGate {
    pub fn new(admin: Address, fee_receiver: Address) -> Self {
        Self {
            admin,
            future_admin: None,
            fee_receiver,
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn future_admin(&self) -> Option<Address> {
        self.future_admin
    }

    pub fn fee_receiver(&self) -> Address {
        self.fee_receiver
    }

    pub fn ensure_admin(&self, caller: Address) -> Result<()> {
        if caller != self.admin {
            return Err(AuthorizationError::NotAdmin { caller }.into());
        }
        Ok(())
    }

    /// Check that `caller` is the committed candidate; with nothing pending
    /// nobody is
    pub fn ensure_future_admin(&self, caller: Address) -> Result<()> {
        if self.future_admin != Some(caller) {
            return Err(AuthorizationError::NotFutureAdmin { caller }.into());
        }
        Ok(())
    }

    /// Record a pending candidate; a later commit overwrites it
    pub(crate) fn commit(&mut self, candidate: Address) {
        self.future_admin = Some(candidate);
    }

    /// Promote the pending candidate; returns the previous admin
    pub(crate) fn accept(&mut self) -> Option<Address> {
        let candidate = self.future_admin.take()?;
        Some(std::mem::replace(&mut self.admin, candidate))
    }

    pub(crate) fn set_fee_receiver(&mut self, fee_receiver: Address) {
        self.fee_receiver = fee_receiver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, RegistryError};

    #[test]
    fn test_two_step_transfer() {
        let alice = Address::from_low_u64(0xa);
        let bob = Address::from_low_u64(0xb);
        let mut gate = AdminGate::new(alice, Address::from_low_u64(0xfee));

        assert!(gate.ensure_admin(alice).is_ok());
        gate.commit(bob);
        // commit alone changes nothing
        assert_eq!(gate.admin(), alice);
        assert_eq!(gate.future_admin(), Some(bob));

        let err: RegistryError = gate.ensure_future_admin(alice).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        assert!(gate.ensure_future_admin(bob).is_ok());
        assert_eq!(gate.accept(), Some(alice));
        assert_eq!(gate.admin(), bob);
        assert_eq!(gate.future_admin(), None);
    }

    #[test]
    fn test_accept_without_commit() {
        let caller = Address::from_low_u64(0xb);
        let gate = AdminGate::new(Address::from_low_u64(0xa), Address::ZERO);
        let err: RegistryError = gate.ensure_future_admin(caller).unwrap_err();
        assert_eq!(err, AuthorizationError::NotFutureAdmin { caller }.into());
    }

    #[test]
    fn test_accept_succeeds_once() {
        let alice = Address::from_low_u64(0xa);
        let bob = Address::from_low_u64(0xb);
        let mut gate = AdminGate::new(alice, Address::ZERO);
        gate.commit(bob);
        gate.ensure_future_admin(bob).unwrap();
        gate.accept();

        let err: RegistryError = gate.ensure_future_admin(bob).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(gate.admin(), bob);
    }
}
