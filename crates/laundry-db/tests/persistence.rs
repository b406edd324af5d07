//! Data written through one `Database` is visible after reopening the file.

use laundry_core::{Money, NewCustomer, NewEmployee, NewService, NewTransaction, TransactionStatus, Weight};
use laundry_db::{Database, DbConfig};

#[tokio::test]
async fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laundry.db");

    let transaction_id = {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();

        let customer = db
            .customers()
            .create(&NewCustomer {
                name: "Budi".to_string(),
                address: "Jl. Melati 3".to_string(),
                phone_number: "081234567890".to_string(),
            })
            .await
            .unwrap();
        let employee = db
            .employees()
            .create(&NewEmployee {
                name: "Sari".to_string(),
                username: "sari".to_string(),
                password: "rahasia123".to_string(),
            })
            .await
            .unwrap();
        let service = db
            .services()
            .create(&NewService {
                name: "Cuci Setrika".to_string(),
                price_per_kg: Money::from_major(8000),
            })
            .await
            .unwrap();

        let t = db
            .transactions()
            .create(&NewTransaction {
                customer_id: customer.id,
                employee_id: employee.id,
                service_id: service.id,
                weight: Weight::from_grams(1500),
                paid: Money::from_major(15000),
            })
            .await
            .unwrap();
        db.transactions()
            .update_status(&t.id, TransactionStatus::Ready)
            .await
            .unwrap();

        db.close().await;
        t.id
    };

    assert!(path.exists());

    let db = Database::new(DbConfig::new(&path)).await.unwrap();

    assert_eq!(db.customers().count().await.unwrap(), 1);
    assert!(db.employees().authenticate("sari", "rahasia123").await.unwrap().is_some());

    let detail = db
        .transactions()
        .get_detail_by_id(&transaction_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.customer_name, "Budi");
    assert_eq!(detail.transaction.status, TransactionStatus::Ready);
    assert_eq!(detail.transaction.total(), Money::from_major(12000));
    assert_eq!(detail.transaction.change(), Money::from_major(3000));

    // Counting continues from the stored rows
    let next = db
        .customers()
        .create(&NewCustomer {
            name: "Ani".to_string(),
            address: String::new(),
            phone_number: "081298765432".to_string(),
        })
        .await
        .unwrap();
    assert!(next.id.starts_with("ID-CS-2-"));
}
