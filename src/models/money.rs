use serde::Serialize;

use super::{Fields, ModelError};
use crate::record;
use crate::schema::{Entity, Record};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub id: i64,
    pub donator_id: i64,
    pub amount: f64,
    pub currency: String,
}

impl TryFrom<Record> for Money {
    type Error = ModelError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let mut f = Fields::new(Entity::Money, record);
        Ok(Self {
            id: f.i64("id")?,
            donator_id: f.i64("donatorId")?,
            amount: f.f64("amount")?,
            currency: f.text("currency")?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewMoney {
    pub amount: f64,
    pub currency: String,
}

impl NewMoney {
    pub(crate) fn into_record(self, donator_id: i64) -> Record {
        record! {
            "donatorId" => donator_id,
            "amount" => self.amount,
            "currency" => self.currency,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoneyPatch {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl From<NewMoney> for MoneyPatch {
    fn from(money: NewMoney) -> Self {
        Self {
            amount: Some(money.amount),
            currency: Some(money.currency),
        }
    }
}

impl MoneyPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn into_record(self) -> Record {
        let mut data = Record::new();
        if let Some(amount) = self.amount {
            data.insert("amount".into(), amount.into());
        }
        if let Some(currency) = self.currency {
            data.insert("currency".into(), currency.into());
        }
        data
    }
}
