use crate::auth::Role;

pub struct SeedUser {
    pub email: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub password: &'static str,
    pub roles: &'static [Role],
}

pub struct SeedItem {
    pub name: &'static str,
    pub quantity: Option<f64>,
    pub quantity_units: Option<&'static str>,
}

/// The first user owns every fixture item and list.
pub const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        email: "ada@example.com",
        first_name: "Ada",
        last_name: "Lovelace",
        password: "Analytical1",
        roles: &[Role::Superadmin, Role::Admin],
    },
    SeedUser {
        email: "alan@example.com",
        first_name: "Alan",
        last_name: "Turing",
        password: "Enigma1912",
        roles: &[Role::Admin],
    },
    SeedUser {
        email: "grace@example.com",
        first_name: "Grace",
        last_name: "Hopper",
        password: "Compiler52",
        roles: &[Role::User],
    },
];

const fn item(
    name: &'static str,
    quantity: Option<f64>,
    quantity_units: Option<&'static str>,
) -> SeedItem {
    SeedItem {
        name,
        quantity,
        quantity_units,
    }
}

pub const SEED_ITEMS: &[SeedItem] = &[
    item("Rice", Some(2.0), Some("kg")),
    item("Black beans", Some(1.0), Some("kg")),
    item("Whole milk", Some(2.0), Some("l")),
    item("Almond milk", Some(1.0), Some("l")),
    item("Sourdough bread", Some(1.0), None),
    item("Eggs", Some(12.0), None),
    item("Butter", Some(250.0), Some("g")),
    item("Cheddar cheese", Some(300.0), Some("g")),
    item("Tomatoes", Some(1.5), Some("kg")),
    item("Onions", Some(1.0), Some("kg")),
    item("Garlic", Some(3.0), None),
    item("Olive oil", Some(0.75), Some("l")),
    item("Spaghetti", Some(500.0), Some("g")),
    item("Chicken breast", Some(1.0), Some("kg")),
    item("Bananas", Some(6.0), None),
    item("Apples", Some(2.0), Some("kg")),
    item("Coffee beans", Some(500.0), Some("g")),
    item("Dish soap", None, None),
    item("Paper towels", Some(4.0), Some("rolls")),
    item("Sparkling water", Some(6.0), Some("bottles")),
];

pub const SEED_LISTS: &[&str] = &["Weekly groceries", "Birthday party", "Cleaning supplies"];

/// How many of the first user's items land in the first list.
pub const SEED_LIST_ENTRIES: u64 = 15;
