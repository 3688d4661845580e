use super::{EntityShape, Member};
use crate::filter::value::{EnumShape, ValueKind};
use crate::query::SearchSource;

pub static USER_ROLE: EnumShape = EnumShape {
    name: "UserRole",
    members: &["Regular", "UserManager", "Admin"],
};

pub static CALORIES_STATUS: EnumShape = EnumShape {
    name: "CaloriesStatus",
    members: &["Pending", "CustomerProvided", "NoInfoFound", "AppProcessed"],
};

static USER_MEMBERS: [Member; 10] = [
    Member::value("Role", ValueKind::Enum(&USER_ROLE)),
    Member::value("FirstName", ValueKind::String),
    Member::value("LastName", ValueKind::String),
    Member::value("UserName", ValueKind::String),
    Member::value("EmailAddress", ValueKind::String),
    Member::value("Password", ValueKind::String),
    Member::value("DailyCalorieLimit", ValueKind::Float64),
    Member::value("Id", ValueKind::Int64),
    Member::value("DateCreated", ValueKind::DateTime),
    Member::value("DateUpdated", ValueKind::DateTime),
];

pub static USER: EntityShape = EntityShape {
    name: "User",
    members: &USER_MEMBERS,
    joined: false,
    owner_field: None,
    search: SearchSource {
        select: "Select * from Users",
        count: "Select count(Id) from Users",
        order_by: "ORDER BY Id",
    },
};

static MEAL_ENTRY_MEMBERS: [Member; 12] = [
    Member::record("EntryUser", &USER),
    Member::record("EntryCreator", &USER),
    Member::value("Text", ValueKind::String),
    Member::value("EntryDateTime", ValueKind::DateTime),
    Member::value("Calories", ValueKind::Float64),
    Member::value("CaloriesStatus", ValueKind::Enum(&CALORIES_STATUS)),
    Member::value("WithInDailyLimit", ValueKind::Boolean),
    Member::value("EntryUserId", ValueKind::Int64),
    Member::value("EntryCreatorId", ValueKind::Int64),
    Member::value("Id", ValueKind::Int64),
    Member::value("DateCreated", ValueKind::DateTime),
    Member::value("DateUpdated", ValueKind::DateTime),
];

pub static MEAL_ENTRY: EntityShape = EntityShape {
    name: "MealEntry",
    members: &MEAL_ENTRY_MEMBERS,
    joined: true,
    owner_field: Some("MealEntry.EntryUserId"),
    search: SearchSource {
        select: "Select * from MealEntries MealEntry \
                 inner join Users EntryUser on MealEntry.EntryUserId = EntryUser.Id \
                 inner join Users EntryCreator on MealEntry.EntryCreatorId = EntryCreator.Id",
        count: "Select count(MealEntry.Id) from MealEntries MealEntry \
                inner join Users EntryUser on MealEntry.EntryUserId = EntryUser.Id \
                inner join Users EntryCreator on MealEntry.EntryCreatorId = EntryCreator.Id",
        order_by: "Order by MealEntry.Id",
    },
};

static MEAL_ITEM_MEMBERS: [Member; 8] = [
    Member::value("Name", ValueKind::String),
    Member::value("Calories", ValueKind::Float64),
    Member::value("WeightInGrams", ValueKind::Float64),
    Member::value("CaloriePerGram", ValueKind::Float64),
    Member::value("MealEntryId", ValueKind::Int64),
    Member::value("Id", ValueKind::Int64),
    Member::value("DateCreated", ValueKind::DateTime),
    Member::value("DateUpdated", ValueKind::DateTime),
];

pub static MEAL_ITEM: EntityShape = EntityShape {
    name: "MealItem",
    members: &MEAL_ITEM_MEMBERS,
    joined: false,
    owner_field: None,
    search: SearchSource {
        select: "Select * from MealItems",
        count: "Select count(Id) from MealItems",
        order_by: "ORDER BY Id",
    },
};
