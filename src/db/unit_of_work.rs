//! Request-scoped write transaction.
//!
//! Every mutation receives a [`UnitOfWork`] and either commits or rolls it
//! back. Dropping one that was never committed rolls the underlying
//! transaction back, so no exit path leaves partial writes behind.

use std::future::Future;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::Result;

pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    /// Open a new transaction on the pool.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self> {
        let txn = db.begin().await?;
        tracing::trace!("Unit of work started");
        Ok(Self { txn })
    }

    /// Open a unit of work and hand it to `op`, which must commit it.
    pub async fn run<T, F, Fut>(db: &DatabaseConnection, op: F) -> Result<T>
    where
        F: FnOnce(UnitOfWork) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let uow = Self::begin(db).await?;
        op(uow).await
    }

    /// Connection to run statements inside this unit of work.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<()> {
        self.txn.commit().await?;
        tracing::trace!("Unit of work committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.txn.rollback().await?;
        tracing::debug!("Unit of work rolled back");
        Ok(())
    }
}
