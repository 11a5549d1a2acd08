use warranty_core_api::RepositoryResult;
use warranty_core_db::repository::{StageChanges, Tracked};

use super::repo_impl::SqliteRepository;
use crate::repository::table_mapping::TableMapping;
use crate::unit_of_work::change_set::WriteOperation;

impl<T: TableMapping> StageChanges<T> for SqliteRepository<T> {
    fn add(&self, entity: T) -> RepositoryResult<Tracked<T>> {
        self.executor.ensure_open()?;
        Ok(self.stage(
            WriteOperation::Insert,
            |interceptor, entity| {
                interceptor.on_insert(entity);
                Ok(())
            },
            entity,
        ))
    }

    fn update(&self, entity: T) -> RepositoryResult<Tracked<T>> {
        self.executor.ensure_open()?;
        Ok(self.stage(
            WriteOperation::Update,
            |interceptor, entity| {
                interceptor.on_update(entity);
                Ok(())
            },
            entity,
        ))
    }

    fn remove(&self, entity: T) -> RepositoryResult<()> {
        self.executor.ensure_open()?;
        self.stage(WriteOperation::Remove, |_, _| Ok(()), entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::{
        create_test_customer, create_test_part, create_test_part_category,
        create_test_policy_coverage_part, create_test_vehicle, create_test_vehicle_model,
        create_test_warranty_policy,
    };
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use uuid::Uuid;
    use warranty_core_api::{ErrorKind, RepositoryError};
    use warranty_core_db::interceptor::FixedClock;
    use warranty_core_db::models::{EntityMeta, SoftDeletable, SoftDeleteState};
    use warranty_core_db::repository::{FindById, LoadAll, SoftDeleteRepository, StageChanges};

    #[tokio::test]
    async fn test_timestamps_are_owned_by_the_interceptor(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let start = Utc::now();
        let clock = Arc::new(FixedClock::new(start));
        let uow = ctx.uow_with_clock(clock.clone());

        let mut category = create_test_part_category("Brakes");
        let forged = start - Duration::days(400);
        category.meta = EntityMeta::from_storage(category.meta.id(), forged, Some(forged));
        let handle = uow.part_categories().add(category)?;
        uow.save_changes().await?;

        let stored = handle.snapshot();
        assert_eq!(stored.meta.created_at(), start);
        assert_eq!(stored.meta.updated_at(), Some(start));

        clock.advance(Duration::minutes(10));
        let mut changed = stored.clone();
        changed.name = heapless::String::try_from("Brake Systems").unwrap();
        // An in-memory change of created_at is never written
        changed.meta = EntityMeta::from_storage(changed.meta.id(), forged, changed.meta.updated_at());
        uow.part_categories().update(changed)?;
        uow.save_changes().await?;

        let reloaded = uow.part_categories().get_by_id(stored.meta.id()).await?.unwrap();
        assert_eq!(reloaded.name.as_str(), "Brake Systems");
        assert_eq!(reloaded.meta.created_at(), start);
        assert_eq!(reloaded.meta.updated_at(), Some(start + Duration::minutes(10)));
        assert!(reloaded.meta.updated_at().unwrap() >= reloaded.meta.created_at());
        Ok(())
    }

    #[tokio::test]
    async fn test_future_created_at_is_ignored_on_update(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let start = Utc::now();
        let clock = Arc::new(FixedClock::new(start));
        let uow = ctx.uow_with_clock(clock.clone());

        let handle = uow.part_categories().add(create_test_part_category("Exhaust"))?;
        uow.save_changes().await?;

        clock.advance(Duration::minutes(10));
        let mut changed = handle.snapshot();
        let forged = start + Duration::days(365 * 50);
        changed.meta = EntityMeta::from_storage(changed.meta.id(), forged, Some(forged));
        changed.name = heapless::String::try_from("Exhaust Systems").unwrap();
        let updated = uow.part_categories().update(changed)?;
        uow.save_changes().await?;

        let published = updated.snapshot();
        assert_eq!(published.name.as_str(), "Exhaust Systems");
        assert_eq!(published.meta.created_at(), start);
        assert_eq!(published.meta.updated_at(), Some(start + Duration::minutes(10)));

        let reloaded = uow
            .part_categories()
            .get_by_id(published.meta.id())
            .await?
            .unwrap();
        assert_eq!(reloaded.meta, published.meta);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_never_changes_deletion_state(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let customer = uow.customers().add(create_test_customer("owner@x.com"))?;
        let model = uow.vehicle_models().add(create_test_vehicle_model("Kia", "Rio", 2023))?;
        uow.save_changes().await?;
        let id = customer.snapshot().meta.id();
        let vehicle = uow.vehicles().add(create_test_vehicle(
            id,
            model.snapshot().meta.id(),
            "KNADN5123K6000001",
            "KI-0001",
        ))?;
        uow.save_changes().await?;

        // A deletion marker set in memory must not bypass delete() and its rules
        let mut changed = customer.snapshot();
        changed.last_name = heapless::String::try_from("Costa").unwrap();
        changed.deletion = SoftDeleteState::from_storage(Some(Utc::now()));
        let updated = uow.customers().update(changed)?;
        assert_eq!(uow.save_changes().await?, 1);

        assert!(updated.snapshot().get_deleted_at().is_none());
        let stored = uow.customers().get_by_id(id).await?.expect("customer stays active");
        assert_eq!(stored.last_name.as_str(), "Costa");
        assert_eq!(uow.vehicles().count().await?, 1);

        uow.vehicles().delete(vehicle.snapshot()).await?;
        uow.save_changes().await?;
        uow.customers().delete(stored).await?;
        uow.save_changes().await?;

        // Nor can clearing it bypass restore()
        let mut revived = uow.customers().get_by_id_including_deleted(id).await?.unwrap();
        revived.deletion = SoftDeleteState::active();
        let updated = uow.customers().update(revived)?;
        uow.save_changes().await?;

        assert!(updated.snapshot().is_deleted());
        assert!(uow.customers().get_by_id(id).await?.is_none());
        assert_eq!(uow.customers().get_deleted().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let never_saved = create_test_customer("ghost@x.com");
        let id = never_saved.meta.id();
        uow.customers().update(never_saved)?;
        let err = uow.save_changes().await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::NotFound { entity: "Customer", id: missing } if missing == id
        ));
        uow.discard_changes();

        uow.policy_coverage_parts()
            .remove(create_test_policy_coverage_part(Uuid::new_v4(), Uuid::new_v4()))?;
        let err = uow.save_changes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_copy_is_a_conflict() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let handle = uow.part_categories().add(create_test_part_category("Lighting"))?;
        uow.save_changes().await?;
        let stale = handle.snapshot();

        let mut first = stale.clone();
        first.description = Some(heapless::String::try_from("Lamps").unwrap());
        uow.part_categories().update(first)?;
        uow.save_changes().await?;

        uow.part_categories().update(stale)?;
        let err = uow.save_changes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConcurrencyConflict);
        Ok(())
    }

    #[tokio::test]
    async fn test_batch_shares_one_timestamp() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let category = uow.part_categories().add(create_test_part_category("Engine"))?;
        let part = uow.parts().add(create_test_part(
            category.snapshot().meta.id(),
            "ENG-001",
            Decimal::from_str("129.99")?,
        ))?;
        assert_eq!(uow.save_changes().await?, 2);

        assert_eq!(
            category.snapshot().meta.created_at(),
            part.snapshot().meta.created_at()
        );
        let stored = uow.parts().get_by_id(part.snapshot().meta.id()).await?.unwrap();
        assert_eq!(stored.unit_price, Decimal::from_str("129.99")?);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_requires_active_references(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let category = uow.part_categories().add(create_test_part_category("Electrical"))?;
        uow.save_changes().await?;
        uow.part_categories().delete(category.snapshot()).await?;
        uow.save_changes().await?;

        uow.parts().add(create_test_part(
            category.snapshot().meta.id(),
            "ELE-001",
            Decimal::ONE,
        ))?;
        let err = uow.save_changes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BusinessRuleViolation);
        assert!(uow.has_changes());
        assert_eq!(uow.parts().count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_coverage_link() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let model = uow.vehicle_models().add(create_test_vehicle_model("Honda", "Civic", 2021))?;
        let category = uow.part_categories().add(create_test_part_category("Transmission"))?;
        uow.save_changes().await?;
        let policy = uow.warranty_policies().add(create_test_warranty_policy(
            model.snapshot().meta.id(),
            "Powertrain",
        ))?;
        let part = uow.parts().add(create_test_part(
            category.snapshot().meta.id(),
            "TRN-001",
            Decimal::TEN,
        ))?;
        uow.save_changes().await?;
        let link = uow.policy_coverage_parts().add(create_test_policy_coverage_part(
            policy.snapshot().meta.id(),
            part.snapshot().meta.id(),
        ))?;
        uow.save_changes().await?;

        // A covered part cannot be deleted while the link exists
        let err = uow.parts().delete(part.snapshot()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BusinessRuleViolation);

        uow.policy_coverage_parts().remove(link.snapshot())?;
        assert_eq!(uow.save_changes().await?, 1);
        assert!(uow
            .policy_coverage_parts()
            .get_by_id(link.snapshot().meta.id())
            .await?
            .is_none());

        uow.parts().delete(part.snapshot()).await?;
        uow.save_changes().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_coverage_link() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let uow = ctx.uow();

        let model = uow.vehicle_models().add(create_test_vehicle_model("Ford", "Focus", 2020))?;
        let category = uow.part_categories().add(create_test_part_category("Cooling"))?;
        uow.save_changes().await?;
        let policy = uow.warranty_policies().add(create_test_warranty_policy(
            model.snapshot().meta.id(),
            "Basic",
        ))?;
        let part = uow.parts().add(create_test_part(
            category.snapshot().meta.id(),
            "COO-001",
            Decimal::ONE,
        ))?;
        uow.save_changes().await?;

        let policy_id = policy.snapshot().meta.id();
        let part_id = part.snapshot().meta.id();
        uow.policy_coverage_parts()
            .add(create_test_policy_coverage_part(policy_id, part_id))?;
        uow.save_changes().await?;

        uow.policy_coverage_parts()
            .add(create_test_policy_coverage_part(policy_id, part_id))?;
        let err = uow.save_changes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        Ok(())
    }
}
