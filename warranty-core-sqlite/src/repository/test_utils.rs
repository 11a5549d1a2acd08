use chrono::NaiveDate;
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;
use warranty_core_db::models::{
    Customer, EntityMeta, Part, PartCategory, PolicyCoveragePart, SoftDeleteState, Vehicle,
    VehicleModel, WarrantyPolicy,
};

pub fn create_test_customer(email: &str) -> Customer {
    Customer {
        meta: EntityMeta::new(),
        deletion: SoftDeleteState::active(),
        first_name: HeaplessString::try_from("Ana").unwrap(),
        last_name: HeaplessString::try_from("Silva").unwrap(),
        email: HeaplessString::try_from(email).unwrap(),
        phone: Some(HeaplessString::try_from("+351 912 345 678").unwrap()),
        address: None,
        hash: 0,
    }
}

pub fn create_test_vehicle_model(brand: &str, model_name: &str, year: i32) -> VehicleModel {
    VehicleModel {
        meta: EntityMeta::new(),
        deletion: SoftDeleteState::active(),
        brand: HeaplessString::try_from(brand).unwrap(),
        model_name: HeaplessString::try_from(model_name).unwrap(),
        year,
        description: None,
        hash: 0,
    }
}

pub fn create_test_vehicle(
    customer_id: Uuid,
    vehicle_model_id: Uuid,
    vin: &str,
    license_plate: &str,
) -> Vehicle {
    Vehicle {
        meta: EntityMeta::new(),
        deletion: SoftDeleteState::active(),
        customer_id,
        vehicle_model_id,
        vin: HeaplessString::try_from(vin).unwrap(),
        license_plate: HeaplessString::try_from(license_plate).unwrap(),
        purchase_date: NaiveDate::from_ymd_opt(2023, 3, 15),
        mileage: 0,
        hash: 0,
    }
}

pub fn create_test_part_category(name: &str) -> PartCategory {
    PartCategory {
        meta: EntityMeta::new(),
        deletion: SoftDeleteState::active(),
        name: HeaplessString::try_from(name).unwrap(),
        description: None,
        hash: 0,
    }
}

pub fn create_test_part(part_category_id: Uuid, part_number: &str, unit_price: Decimal) -> Part {
    Part {
        meta: EntityMeta::new(),
        deletion: SoftDeleteState::active(),
        part_category_id,
        part_number: HeaplessString::try_from(part_number).unwrap(),
        name: HeaplessString::try_from("Test Part").unwrap(),
        unit_price,
        hash: 0,
    }
}

pub fn create_test_warranty_policy(vehicle_model_id: Uuid, name: &str) -> WarrantyPolicy {
    WarrantyPolicy {
        meta: EntityMeta::new(),
        deletion: SoftDeleteState::active(),
        vehicle_model_id,
        name: HeaplessString::try_from(name).unwrap(),
        duration_months: 36,
        mileage_limit: Some(100_000),
        hash: 0,
    }
}

pub fn create_test_policy_coverage_part(warranty_policy_id: Uuid, part_id: Uuid) -> PolicyCoveragePart {
    PolicyCoveragePart {
        meta: EntityMeta::new(),
        warranty_policy_id,
        part_id,
        hash: 0,
    }
}
