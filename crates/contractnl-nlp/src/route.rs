//! Query routing: a fixed-priority decision table from extracted data to
//! a query type and action tag.

use serde::Serialize;

use contractnl_core::{ActionType, EntityFilter, Header, QueryType, ValidationError};

use crate::extract::filters::{ATTR_CREATED_DATE, ATTR_STATUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    #[serde(rename = "queryType")]
    pub query_type: QueryType,
    #[serde(rename = "actionType")]
    pub action_type: ActionType,
}

/// Route a validated query.
pub fn route(header: &Header, entities: &[EntityFilter], errors: &[ValidationError]) -> Route {
    if errors.iter().any(|e| e.severity.is_blocker()) {
        return Route {
            query_type: QueryType::Contracts,
            action_type: ActionType::Error,
        };
    }

    let query_type = if header.part_number.is_some() && header.contract_number.is_none() {
        QueryType::Parts
    } else {
        QueryType::Contracts
    };

    Route {
        query_type,
        action_type: action_for(header, entities),
    }
}

fn action_for(header: &Header, entities: &[EntityFilter]) -> ActionType {
    if header.contract_number.is_some() {
        ActionType::ContractsByContractNumber
    } else if header.part_number.is_some() {
        ActionType::PartsByPartNumber
    } else if header.customer_number.is_some() {
        ActionType::ContractsByCustomerNumber
    } else if header.customer_name.is_some() {
        ActionType::ContractsByCustomerName
    } else if header.created_by.is_some() {
        ActionType::ContractsByCreatedBy
    } else if let Some(first) = entities.first() {
        match first.attribute.as_str() {
            ATTR_CREATED_DATE => ActionType::ContractsByDate,
            ATTR_STATUS => ActionType::ContractsByStatus,
            _ => ActionType::ContractsByFilter,
        }
    } else {
        ActionType::GeneralQuery
    }
}
