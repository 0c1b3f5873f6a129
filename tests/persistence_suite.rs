mod common;

use common::setup_test_env;
use laundry_core::{
    config::Config,
    core::services::{CustomerService, NewCustomer, NewOrder, NewOrderItem, OrderService},
    ledger::{PaymentMethod, Service},
};
use rust_decimal_macros::dec;

#[test]
fn full_store_roundtrip_preserves_every_collection() {
    let (mut manager, _config) = setup_test_env();
    manager.create("main", "Sparkle Laundry").unwrap();

    let customer = {
        let ledger = manager.require_current_mut().unwrap();
        let customer = CustomerService::add(
            &mut *ledger,
            NewCustomer {
                name: "Amira".into(),
                phone_number: "0501234567".into(),
                ..NewCustomer::default()
            },
        )
        .unwrap();
        let service_id = ledger.add_service(Service::new("Ironing", dec!(4.99), 30, "Express"));
        let order = OrderService::create_order(
            ledger,
            NewOrder {
                customer_id: customer.id,
                items: vec![NewOrderItem {
                    service_id,
                    quantity: 2,
                    price_override: None,
                }],
                initial_payment: None,
            },
        )
        .unwrap();
        OrderService::record_payment(ledger, order.id, dec!(5.00), PaymentMethod::Cash, None)
            .unwrap();
        customer
    };

    manager.save().unwrap();
    manager.close();
    manager.open("main").unwrap();

    let ledger = manager.require_current().unwrap();
    assert_eq!(ledger.customers.len(), 1);
    assert_eq!(ledger.services.len(), 1);
    assert_eq!(ledger.orders.len(), 1);
    assert_eq!(ledger.payments.len(), 1);

    let reloaded = ledger.customer(customer.id).unwrap();
    assert_eq!(reloaded.customer_code, "CUST001");

    // Money fields survive the JSON float representation.
    let order = &ledger.orders[0];
    assert_eq!(order.subtotal, dec!(9.98));
    assert_eq!(order.vat_amount, dec!(0.50));
    assert_eq!(order.total, dec!(10.48));
    assert_eq!(order.amount_paid, dec!(5.00));
}

#[test]
fn last_store_survives_a_new_manager_on_the_same_directory() {
    let (mut manager, _config) = setup_test_env();
    manager.create("evening-shift", "Sparkle Laundry").unwrap();
    manager.close();

    let reopened = manager.open_last().unwrap();
    assert_eq!(reopened.as_deref(), Some("evening_shift"));
    assert!(manager.require_current().is_ok());
}

#[test]
fn backups_capture_the_state_at_backup_time() {
    let (mut manager, _config) = setup_test_env();
    manager.create("main", "Sparkle Laundry").unwrap();

    {
        let ledger = manager.require_current_mut().unwrap();
        ledger.add_service(Service::new("Ironing", dec!(4.99), 30, "Express"));
    }
    manager.save().unwrap();
    manager.backup(Some("with ironing")).unwrap();

    {
        let ledger = manager.require_current_mut().unwrap();
        ledger.services.clear();
    }
    manager.save().unwrap();

    let backups = manager.list_backups().unwrap();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].contains("with-ironing"));

    manager.restore_backup(&backups[0]).unwrap();
    assert_eq!(manager.require_current().unwrap().services.len(), 1);
}

#[test]
fn config_defaults_then_roundtrips() {
    let (_manager, config_manager) = setup_test_env();

    let initial = config_manager.load().unwrap();
    assert_eq!(initial.currency, "AED");

    let mut updated = Config::default();
    updated.shop_name = "Sparkle Laundry".into();
    updated.backup_retention = 9;
    config_manager.save(&updated).unwrap();

    let reloaded = config_manager.load().unwrap();
    assert_eq!(reloaded.shop_name, "Sparkle Laundry");
    assert_eq!(reloaded.backup_retention, 9);
}

#[test]
fn export_and_import_through_explicit_paths() {
    let (mut manager, _config) = setup_test_env();
    manager.create("main", "Sparkle Laundry").unwrap();
    {
        let ledger = manager.require_current_mut().unwrap();
        ledger.add_service(Service::new("Dry Cleaning", dec!(8.99), 120, "Premium"));
    }

    let export_dir = tempfile::tempdir().unwrap();
    let export_path = export_dir.path().join("export.json");
    manager.save_to_path(&export_path).unwrap();

    manager.close();
    manager.load_from_path(&export_path).unwrap();
    let ledger = manager.require_current().unwrap();
    assert_eq!(ledger.services.len(), 1);
    assert_eq!(ledger.services[0].name, "Dry Cleaning");
}
