use super::{ServiceError, ServiceResult};
use crate::models::{
    Donation, Food, FoodPatch, Money, MoneyPatch, NewFood, NewMoney, QUANTITY_TYPES,
};
use crate::record;
use crate::schema::{Entity, Record};
use crate::storage::{Order, Query, Storage, StorageRead, StorageTx, StorageWrite};

const MAX_DONATION: f64 = 1000.0;

fn within_limit(n: f64) -> bool {
    n > 0.0 && n <= MAX_DONATION
}

fn check_picture(picture: &[u8]) -> ServiceResult<()> {
    if picture.is_empty() {
        return Err(ServiceError::bad_request("Picture is required"));
    }
    Ok(())
}

fn check_quantity(quantity: f64) -> ServiceResult<()> {
    if !within_limit(quantity) {
        return Err(ServiceError::bad_request(
            "Quantity must be greater than 0 and at most 1000",
        ));
    }
    Ok(())
}

fn check_quantity_type(quantity_type: &str) -> ServiceResult<()> {
    if !QUANTITY_TYPES.contains(&quantity_type) {
        return Err(ServiceError::bad_request("Invalid quantity type"));
    }
    Ok(())
}

fn check_amount(amount: f64) -> ServiceResult<()> {
    if !within_limit(amount) {
        return Err(ServiceError::bad_request("The amount value is not correct"));
    }
    Ok(())
}

fn check_currency(currency: &str) -> ServiceResult<()> {
    if currency.trim().is_empty() {
        return Err(ServiceError::bad_request("You have to choose a currency"));
    }
    Ok(())
}

fn validate_food(food: &NewFood) -> ServiceResult<()> {
    check_picture(&food.picture)?;
    check_quantity(food.quantity)?;
    check_quantity_type(&food.quantity_type)
}

fn validate_food_patch(patch: &FoodPatch) -> ServiceResult<()> {
    if patch.is_empty() {
        return Err(ServiceError::bad_request("Nothing to update"));
    }
    if let Some(picture) = &patch.picture {
        check_picture(picture)?;
    }
    if let Some(quantity) = patch.quantity {
        check_quantity(quantity)?;
    }
    if let Some(quantity_type) = &patch.quantity_type {
        check_quantity_type(quantity_type)?;
    }
    Ok(())
}

fn validate_money(money: &NewMoney) -> ServiceResult<()> {
    check_amount(money.amount)?;
    check_currency(&money.currency)
}

fn validate_money_patch(patch: &MoneyPatch) -> ServiceResult<()> {
    if patch.is_empty() {
        return Err(ServiceError::bad_request("Nothing to update"));
    }
    if let Some(amount) = patch.amount {
        check_amount(amount)?;
    }
    if let Some(currency) = &patch.currency {
        check_currency(currency)?;
    }
    Ok(())
}

/// Update filter selecting one donator's items, or every item.
fn donator_filter(donator_id: Option<i64>) -> Record {
    match donator_id {
        Some(id) => record! { "donatorId" => id },
        None => Record::new(),
    }
}

pub struct DonationService<S> {
    storage: S,
}

impl<S: Storage> DonationService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Store the food item and its donation entry together.
    pub fn create_food_donation(&self, donator_id: i64, food: NewFood) -> ServiceResult<Food> {
        validate_food(&food)?;

        let tx = self.storage.begin_tx()?;
        ensure_donator(&tx, donator_id)?;
        let created = tx.create(Entity::Food, &food.into_record(donator_id))?;
        let food = Food::try_from(created)?;
        record_donation(&tx, donator_id, food.id)?;
        tx.commit()?;

        log::info!(
            "user {donator_id} donated {} {} of food (item {})",
            food.quantity,
            food.quantity_type,
            food.id
        );
        Ok(food)
    }

    pub fn create_money_donation(&self, donator_id: i64, money: NewMoney) -> ServiceResult<Money> {
        validate_money(&money)?;

        let tx = self.storage.begin_tx()?;
        ensure_donator(&tx, donator_id)?;
        let created = tx.create(Entity::Money, &money.into_record(donator_id))?;
        let money = Money::try_from(created)?;
        record_donation(&tx, donator_id, money.id)?;
        tx.commit()?;

        log::info!(
            "user {donator_id} donated {} {} (item {})",
            money.amount,
            money.currency,
            money.id
        );
        Ok(money)
    }

    pub fn list_food(&self) -> ServiceResult<Vec<Food>> {
        self.list(Entity::Food, Record::new())
    }

    pub fn list_money(&self) -> ServiceResult<Vec<Money>> {
        self.list(Entity::Money, Record::new())
    }

    /// Donation entries, optionally only those of one user.
    pub fn list_donations(&self, user_id: Option<i64>) -> ServiceResult<Vec<Donation>> {
        let filter = match user_id {
            Some(id) => record! { "userId" => id },
            None => Record::new(),
        };
        self.list(Entity::Donation, filter)
    }

    pub fn find_food(&self, id: i64) -> ServiceResult<Food> {
        self.find(Entity::Food, id)
    }

    pub fn find_money(&self, id: i64) -> ServiceResult<Money> {
        self.find(Entity::Money, id)
    }

    /// Count food items, all of them or only those of `donator_id`.
    pub fn count_food(&self, donator_id: Option<i64>) -> ServiceResult<u64> {
        Ok(self.storage.count(Entity::Food, &donator_filter(donator_id))?)
    }

    pub fn count_money(&self, donator_id: Option<i64>) -> ServiceResult<u64> {
        Ok(self.storage.count(Entity::Money, &donator_filter(donator_id))?)
    }

    pub fn update_food_by_id(&self, id: i64, patch: FoodPatch) -> ServiceResult<Food> {
        validate_food_patch(&patch)?;
        self.update_one(Entity::Food, id, patch.into_record())
    }

    /// Patch every food item, or only those of `donator_id`.
    pub fn update_all_food(&self, patch: FoodPatch, donator_id: Option<i64>) -> ServiceResult<usize> {
        validate_food_patch(&patch)?;
        self.update_many(Entity::Food, patch.into_record(), donator_id)
    }

    /// Overwrite every field of a food item except its donator.
    pub fn replace_food_by_id(&self, id: i64, food: NewFood) -> ServiceResult<Food> {
        validate_food(&food)?;
        self.update_one(Entity::Food, id, FoodPatch::from(food).into_record())
    }

    pub fn update_money_by_id(&self, id: i64, patch: MoneyPatch) -> ServiceResult<Money> {
        validate_money_patch(&patch)?;
        self.update_one(Entity::Money, id, patch.into_record())
    }

    pub fn update_all_money(
        &self,
        patch: MoneyPatch,
        donator_id: Option<i64>,
    ) -> ServiceResult<usize> {
        validate_money_patch(&patch)?;
        self.update_many(Entity::Money, patch.into_record(), donator_id)
    }

    pub fn replace_money_by_id(&self, id: i64, money: NewMoney) -> ServiceResult<Money> {
        validate_money(&money)?;
        self.update_one(Entity::Money, id, MoneyPatch::from(money).into_record())
    }

    pub fn delete_food(&self, id: i64) -> ServiceResult<()> {
        self.delete(Entity::Food, id)
    }

    pub fn delete_money(&self, id: i64) -> ServiceResult<()> {
        self.delete(Entity::Money, id)
    }

    fn list<T>(&self, entity: Entity, filter: Record) -> ServiceResult<Vec<T>>
    where
        T: TryFrom<Record>,
        ServiceError: From<T::Error>,
    {
        let query = Query::filter(filter).with_order(vec![Order::asc("id")]);
        let mut items = Vec::new();
        for record in self.storage.find(entity, &query)? {
            items.push(T::try_from(record)?);
        }
        Ok(items)
    }

    fn find<T>(&self, entity: Entity, id: i64) -> ServiceResult<T>
    where
        T: TryFrom<Record>,
        ServiceError: From<T::Error>,
    {
        match self.storage.find_by_id(entity, id)? {
            Some(record) => Ok(T::try_from(record)?),
            None => Err(ServiceError::NotFound(format!("{entity} {id} not found"))),
        }
    }

    fn update_one<T>(&self, entity: Entity, id: i64, data: Record) -> ServiceResult<T>
    where
        T: TryFrom<Record>,
        ServiceError: From<T::Error>,
    {
        let tx = self.storage.begin_tx()?;
        if tx.update_by_id(entity, id, &data)? == 0 {
            return Err(ServiceError::NotFound(format!("{entity} {id} not found")));
        }
        let updated = tx
            .find_by_id(entity, id)?
            .ok_or_else(|| ServiceError::NotFound(format!("{entity} {id} not found")))?;
        tx.commit()?;
        log::info!("updated {entity} {id}");
        Ok(T::try_from(updated)?)
    }

    fn update_many(
        &self,
        entity: Entity,
        data: Record,
        donator_id: Option<i64>,
    ) -> ServiceResult<usize> {
        let tx = self.storage.begin_tx()?;
        let affected = tx.update_all(entity, &data, &donator_filter(donator_id))?;
        tx.commit()?;
        log::info!("updated {affected} {entity} item(s)");
        Ok(affected)
    }

    fn delete(&self, entity: Entity, id: i64) -> ServiceResult<()> {
        let tx = self.storage.begin_tx()?;
        let affected = tx.delete_by_id(entity, id)?;
        tx.commit()?;
        if affected == 0 {
            return Err(ServiceError::NotFound(format!("{entity} {id} not found")));
        }
        log::info!("deleted {entity} {id}");
        Ok(())
    }
}

fn ensure_donator<T: StorageRead>(tx: &T, donator_id: i64) -> ServiceResult<()> {
    if tx.find_by_id(Entity::User, donator_id)?.is_none() {
        log::warn!("donation refused: user {donator_id} does not exist");
        return Err(ServiceError::Unauthorized("invalid User".into()));
    }
    Ok(())
}

fn record_donation<T: StorageWrite>(tx: &T, donator_id: i64, item_id: i64) -> ServiceResult<()> {
    tx.create(
        Entity::Donation,
        &record! {
            "userId" => donator_id,
            "itemId" => item_id,
            "donatedByUser" => donator_id,
        },
    )?;
    Ok(())
}
