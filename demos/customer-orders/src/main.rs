use demo_customer_orders::{Customer, CustomerRepository, Order, OrderRepository};

use crumb::{sqlite::Sqlite, Db};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> crumb::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let driver = match std::env::var("DATABASE_URL") {
        Ok(url) => Sqlite::new(url)?,
        Err(_) => Sqlite::in_memory(),
    };

    let mut builder = Db::builder();
    builder.register::<Customer>().register::<Order>();
    let db = builder.connect(driver).await?;
    db.push_schema().await?;

    let customers = CustomerRepository::new(&db)?;
    let orders = OrderRepository::new(&db)?;

    // save a few customers
    let mut jack = Customer::new("Jack", "Bauer", "{\"zip\":94087}");
    let mut kim = Customer::new("Kim", "Bauer", "{}");
    let mut chloe = Customer::new("Chloe", "O'Brian", "{}");
    customers.save(&mut jack).await?;
    customers.save(&mut chloe).await?;
    customers.save(&mut kim).await?;
    customers.save(&mut Customer::new("David", "Palmer", "{}")).await?;
    customers.save(&mut Customer::new("Michelle", "Dean", "{}")).await?;

    // make some orders
    orders.save(&mut Order::new(&jack, "shoes")).await?;
    orders.save(&mut Order::new(&jack, "shirt")).await?;
    orders.save(&mut Order::new(&jack, "apple ipad")).await?;
    orders.save(&mut Order::new(&kim, "apple iphone")).await?;
    orders.save(&mut Order::new(&kim, "book")).await?;
    orders.save(&mut Order::new(&kim, "tv")).await?;
    orders.save(&mut Order::new(&chloe, "apple mac")).await?;

    // fetch first customer
    info!("Customers found with find_by_id(1):");
    info!("-------------------------------");
    if let Some(customer) = customers.find_by_id(1).await? {
        info!("{customer:?}");
    }

    // fetch all customers
    info!("Customers found with find_all():");
    info!("-------------------------------");
    let mut all = customers.find_all().await?;
    while let Some(customer) = all.next().await {
        info!("{:?}", customer?);
    }

    // fetch last customer in table
    info!("Last customer with find_top_by_id_desc():");
    info!("-------------------------------");
    if let Some(last) = customers.find_top_by_id_desc().await? {
        if let Some(id) = last.id() {
            info!("Customer found with find_by_id({id}):");
            info!("--------------------------------");
            info!("{:?}", customers.find_by_id(id).await?);
        }
    }

    // fetch customers by last name
    info!("Customers found with find_by_last_name(\"Bauer\"):");
    info!("--------------------------------------------");
    for bauer in customers.find_by_last_name("Bauer").await? {
        info!("{bauer:?}");
    }

    // get all of Jack's orders
    info!("All of Jack's orders with find_all_by_customer(jack):");
    info!("--------------------------------------------");
    for order in orders.find_all_by_customer(&jack).await? {
        info!("{order:?}");
    }

    // get all apple orders
    info!("All apple orders with find_all_by_description_contains_ignore_case(\"apple\"):");
    info!("--------------------------------------------");
    for order in orders
        .find_all_by_description_contains_ignore_case("apple")
        .await?
    {
        info!("{order:?}");
    }

    // get all Bauer orders
    info!("All Bauer orders with find_by_customer_last_name(\"Bauer\"):");
    info!("--------------------------------------------");
    for order in orders.find_by_customer_last_name("Bauer").await? {
        info!("{order:?}");
    }

    // get all orders with more info
    info!("All orders with find_all_with_info():");
    info!("--------------------------------------------");
    for row in orders.find_all_with_info().await? {
        info!(
            "{}:{}:{} {}",
            row.id, row.description, row.first_name, row.last_name
        );
    }

    // get all orders of jack with more info
    info!("All of Jack's orders with find_all_by_customer_with_info(jack):");
    info!("--------------------------------------------");
    for row in orders.find_all_by_customer_with_info(&jack).await? {
        info!(
            "{}:{}:{} {}",
            row.id, row.description, row.first_name, row.last_name
        );
    }

    // get all customers by full name using the concatenation query
    info!("Customers found with find_by_full_name(\"Jack Bauer\"):");
    info!("--------------------------------------------");
    for customer in customers.find_by_full_name("Jack Bauer").await? {
        info!("{customer:?}");
    }

    // patch metadata
    info!("Update Jack's meta_data");
    info!("--------------------------------------------");
    info!("{jack:?}");
    customers.merge_metadata(&jack, "{\"zip\": 94086}").await?; // existing keys updated
    customers.merge_metadata(&jack, "{\"country\": \"CA\"}").await?; // new keys added
    customers.merge_metadata(&jack, "{}").await?; // empty patch has no effect

    // fetch from db
    if let Some(id) = jack.id() {
        info!("{:?}", customers.find_by_id(id).await?);
    }

    Ok(())
}
