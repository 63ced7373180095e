//! Record schemas for each stream

use crate::schema::{
    array, boolean, date_time, fields, integer, number, object, one_of, string, JsonSchema,
    JsonType, SchemaProperty,
};
use std::collections::BTreeMap;

type Fields = BTreeMap<String, SchemaProperty>;

pub(crate) fn products() -> JsonSchema {
    JsonSchema::from_fields(fields([
        ("id", integer()),
        ("name", string()),
        ("status", string()),
        ("createdDate", date_time()),
        ("modifiedDate", date_time()),
        ("description", string()),
        ("images", array(object([("link", string())]))),
        ("supplierId", integer()),
        ("brand", string()),
        ("category", string()),
        ("stockControl", integer()),
        ("orderType", string()),
        ("productType", string()),
        ("productOptions", array(product_option())),
    ]))
}

fn product_option() -> SchemaProperty {
    object([
        ("id", integer()),
        ("createdDate", date_time()),
        ("modifiedDate", date_time()),
        ("status", string()),
        ("productId", integer()),
        ("code", string()),
        ("barcode", string()),
        ("retailPrice", number()),
        ("wholesalePrice", number()),
        ("vipPrice", number()),
        ("specialPrice", number()),
        ("specialsStartDate", string()),
        ("specialDays", integer()),
        ("stockAvailable", number()),
        ("stockOnHand", number()),
        ("image", object([("link", string())])),
        (
            "priceColumns",
            object([
                ("priceAUD", number()),
                ("priceGBP", number()),
                ("costNZD", number()),
            ]),
        ),
    ])
}

pub(crate) fn purchase_orders() -> JsonSchema {
    let mut props = order_fields();
    props.extend(fields([
        ("supplierInvoiceReference", string()),
        ("supplierAcceptanceDate", string()),
        ("fullyReceivedDate", string()),
        ("invoiceDate", string()),
        ("logisticsCarrier", string()),
        ("lineItems", array(line_item(false))),
    ]));
    JsonSchema::from_fields(props)
}

pub(crate) fn sale_order() -> JsonSchema {
    let mut props = order_fields();
    props.extend(fields([
        ("invoiceDate", string()),
        ("invoiceNumber", integer()),
        ("dispatchedDate", string()),
        ("logisticsCarrier", string()),
        ("logisticsStatus", integer()),
        ("distributionBranchId", integer()),
        ("lineItems", array(line_item(true))),
    ]));
    JsonSchema::from_fields(props)
}

/// Header fields shared by purchase and sales orders
fn order_fields() -> Fields {
    let mut props = fields([
        ("id", integer()),
        ("createdDate", date_time()),
        ("modifiedDate", date_time()),
        ("createdBy", integer()),
        ("processedBy", integer()),
        ("isApproved", boolean()),
        ("reference", string()),
        ("memberId", integer()),
        ("firstName", string()),
        ("lastName", string()),
        ("company", string()),
        ("email", string()),
        ("phone", string()),
        ("mobile", string()),
        ("fax", string()),
        ("branchId", integer()),
        ("branchEmail", string()),
        ("projectName", string()),
        ("trackingCode", string()),
        ("internalComments", string()),
        ("productTotal", number()),
        ("freightTotal", number()),
        ("freightDescription", string()),
        ("surcharge", number()),
        ("surchargeDescription", string()),
        ("discountTotal", number()),
        ("discountDescription", string()),
        ("total", number()),
        ("currencyCode", string()),
        ("currencyRate", number()),
        ("currencySymbol", string()),
        ("taxStatus", string()),
        ("taxRate", number()),
        ("source", string()),
        ("isVoid", boolean()),
        ("memberEmail", string()),
        ("memberCostCenter", string()),
        ("memberAlternativeTaxRate", string()),
        ("costCenter", string()),
        ("alternativeTaxRate", string()),
        ("estimatedDeliveryDate", string()),
        ("salesPersonId", number()),
        ("salesPersonEmail", string()),
        ("paymentTerms", string()),
        ("customerOrderNo", string()),
        ("voucherCode", string()),
        ("deliveryInstructions", string()),
        ("status", string()),
        ("stage", string()),
    ]);

    for prefix in ["delivery", "billing"] {
        for suffix in [
            "FirstName",
            "LastName",
            "Company",
            "Address1",
            "Address2",
            "City",
            "State",
            "PostalCode",
            "Country",
        ] {
            props.insert(format!("{prefix}{suffix}"), string());
        }
    }

    props
}

fn line_item(with_stock_control: bool) -> SchemaProperty {
    let mut item = object([
        ("id", integer()),
        ("createdDate", date_time()),
        ("transactionId", integer()),
        ("parentId", integer()),
        ("productId", integer()),
        ("productOptionId", integer()),
        ("integrationRef", string()),
        ("sort", integer()),
        ("code", string()),
        ("name", string()),
        ("option1", string()),
        ("option2", string()),
        ("option3", string()),
        ("qty", number()),
        ("styleCode", string()),
        ("barcode", string()),
        ("sizeCodes", string()),
        ("lineComments", string()),
        ("unitPrice", number()),
        ("discount", number()),
        ("qtyShipped", number()),
        ("holdingQty", number()),
        ("accountCode", string()),
    ]);

    if with_stock_control {
        if let Some(props) = item.properties.as_mut() {
            props.insert("stockControl".to_string(), string());
        }
    }

    item
}

pub(crate) fn stockstream() -> JsonSchema {
    JsonSchema::from_fields(fields([
        ("productId", integer()),
        ("productOptionId", integer()),
        ("modifiedDate", date_time()),
        ("styleCode", string()),
        ("code", string()),
        ("barcode", string()),
        ("branchId", integer()),
        ("branchName", string()),
        ("productName", string()),
        ("option1", string()),
        ("option2", string()),
        ("option3", string()),
        ("size", string()),
        ("available", number()),
        ("stockOnHand", number()),
        ("openSales", number()),
        ("incoming", number()),
        ("virtual", number()),
        ("holding", number()),
    ]))
}

pub(crate) fn voucher() -> JsonSchema {
    JsonSchema::from_fields(fields([
        ("customerID", integer()),
        ("createdDate", date_time()),
        ("status", string()),
        ("code", string()),
        ("type", string()),
        ("description", string()),
        ("expiryDate", string()),
        ("amount", number()),
        ("customerEmail", string()),
        ("redeemedCount", integer()),
        ("redeemedCountLimit", integer()),
        ("redeemedAmount", number()),
    ]))
}

pub(crate) fn contact_supplier() -> JsonSchema {
    let mut props = contact_fields();
    props.extend(fields([
        ("type", string()),
        ("salesPersonId", integer()),
        ("accountNumber", string()),
        ("billingId", integer()),
        ("billingCompany", string()),
        ("accountsFirstName", string()),
        ("accountsLastName", string()),
        ("billingEmail", string()),
        ("accountsPhone", string()),
        ("billingCostCenter", string()),
        ("priceColumn", string()),
        ("creditLimit", number()),
        ("balanceOwing", number()),
    ]));
    JsonSchema::from_fields(props)
}

pub(crate) fn branches() -> JsonSchema {
    let mut props = contact_fields();
    props.extend(fields([
        ("id", number()),
        ("branchType", string()),
        ("stockControlOptions", string()),
        ("taxStatus", string()),
        ("accountNumber", string()),
        (
            "branchLocations",
            array(object([
                ("zone", string()),
                ("bins", one_of(&[JsonType::Array, JsonType::String])),
            ])),
        ),
        ("customFields", one_of(&[JsonType::Object, JsonType::String])),
        (
            "secondaryContacts",
            array(object([
                ("Id", number()),
                ("Company", string()),
                ("FirstName", string()),
                ("LastName", string()),
                ("JobTitle", string()),
                ("Email", string()),
                ("Mobile", string()),
                ("Phone", string()),
            ])),
        ),
    ]));
    JsonSchema::from_fields(props)
}

/// Address-book fields shared by contacts and branches
fn contact_fields() -> Fields {
    fields([
        ("id", integer()),
        ("createdDate", date_time()),
        ("modifiedDate", date_time()),
        ("isActive", boolean()),
        ("company", string()),
        ("firstName", string()),
        ("lastName", string()),
        ("jobTitle", string()),
        ("email", string()),
        ("website", string()),
        ("phone", string()),
        ("fax", string()),
        ("mobile", string()),
        ("address1", string()),
        ("address2", string()),
        ("city", string()),
        ("state", string()),
        ("postCode", string()),
        ("country", string()),
        ("postalAddress1", string()),
        ("postalAddress2", string()),
        ("postalCity", string()),
        ("postalPostCode", string()),
        ("postalState", string()),
        ("postalCountry", string()),
        ("notes", string()),
        ("integrationRef", string()),
    ])
}
