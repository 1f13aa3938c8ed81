use tracing::debug;

use crate::{
    flixlog::models::{Parcel, QuoteRequest},
    package::{LineItem, Package},
    util::{non_negative, normalize_postcode},
};

/// Формирование запроса по корзине.
/// `None`, если хотя бы один из индексов не содержит цифр: запрос не отправляется
pub fn build(package: &Package, origin_postcode: &str, destination_postcode: &str) -> Option<QuoteRequest> {
    let from = normalize_postcode(origin_postcode);
    let to = normalize_postcode(destination_postcode);

    if from.is_empty() || to.is_empty() {
        debug!(origin = origin_postcode, destination = destination_postcode, "Индекс не задан, расчёт пропущен");
        return None;
    }

    let parcels = package.shippable_items().map(parcel).collect();

    Some(QuoteRequest {
        origin_postcode: from,
        destination_postcode: to,
        parcels,
    })
}

/// Место отправления из позиции корзины: сантиметры переводятся в метры
fn parcel(item: &LineItem) -> Parcel {
    let quantity = non_negative(item.quantity);

    Parcel {
        reference: item.sku.clone().unwrap_or_default(),
        height_m: non_negative(item.height_cm) / 100.,
        weight_kg: non_negative(item.weight_kg),
        quantity,
        width_m: non_negative(item.width_cm) / 100.,
        length_m: non_negative(item.length_cm) / 100.,
        cargo_value: non_negative(non_negative(item.unit_price) * quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn book() -> LineItem {
        LineItem {
            sku: Some("BOOK-1".into()),
            height_cm: 10.,
            width_cm: 20.,
            length_cm: 30.,
            weight_kg: 2.,
            quantity: 3.,
            unit_price: 50.,
            ..Default::default()
        }
    }

    fn ebook() -> LineItem {
        LineItem {
            sku: Some("EBOOK-1".into()),
            quantity: 1.,
            unit_price: 20.,
            requires_shipping: false,
            ..Default::default()
        }
    }

    #[test]
    fn maps_shippable_items_to_parcels() {
        let package = Package {
            destination_postcode: "01310-100".into(),
            items: vec![book(), ebook()],
        };

        let request = build(&package, "12345-678", &package.destination_postcode).unwrap();
        assert_eq!(request.origin_postcode, "12345678");
        assert_eq!(request.destination_postcode, "01310100");
        assert_eq!(
            request.parcels,
            [Parcel {
                reference: "BOOK-1".into(),
                height_m: 0.1,
                weight_kg: 2.,
                quantity: 3.,
                width_m: 0.2,
                length_m: 0.3,
                cargo_value: 150.,
            }]
        );
    }

    #[rstest]
    #[case("12345-678", "01310-100")]
    #[case("12345678", "01310100")]
    #[case(" 12.345.678 ", "CEP 01310 100")]
    fn formatting_does_not_change_request(#[case] origin: &str, #[case] destination: &str) {
        let package = Package {
            destination_postcode: destination.into(),
            items: vec![book()],
        };
        let expected = build(&package, "12345678", "01310100");

        assert!(expected.is_some());
        assert_eq!(build(&package, origin, destination), expected);
    }

    #[rstest]
    #[case("", "01310-100")]
    #[case("12345-678", "")]
    #[case("abc", "01310-100")]
    #[case("12345-678", "---")]
    fn skips_when_postcode_has_no_digits(#[case] origin: &str, #[case] destination: &str) {
        let package = Package {
            destination_postcode: destination.into(),
            items: vec![book()],
        };
        assert_eq!(build(&package, origin, destination), None);
    }

    #[test]
    fn malformed_values_become_zero() {
        let item = LineItem {
            sku: None,
            height_cm: f64::NAN,
            width_cm: -5.,
            length_cm: f64::INFINITY,
            weight_kg: -1.,
            quantity: -2.,
            unit_price: 10.,
            ..Default::default()
        };
        let package = Package {
            destination_postcode: "01310100".into(),
            items: vec![item],
        };

        let request = build(&package, "12345678", "01310100").unwrap();
        assert_eq!(request.parcels, [Parcel::default()]);
    }

    #[test]
    fn keeps_package_order() {
        let mut second = book();
        second.sku = Some("BOOK-2".into());
        let package = Package {
            destination_postcode: "01310100".into(),
            items: vec![book(), ebook(), second],
        };

        let request = build(&package, "12345678", "01310100").unwrap();
        let references: Vec<_> = request.parcels.iter().map(|p| p.reference.as_str()).collect();
        assert_eq!(references, ["BOOK-1", "BOOK-2"]);
    }

    #[test]
    fn serializes_wire_field_names() {
        let package = Package {
            destination_postcode: "01310100".into(),
            items: vec![book()],
        };
        let request = build(&package, "12345678", "01310100").unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["from"], "12345678");
        assert_eq!(json["to"], "01310100");
        assert_eq!(json["parcels"][0]["height"], 0.1);
        assert_eq!(json["parcels"][0]["cargo_value"], 150.);
        assert_eq!(json["parcels"][0]["reference"], "BOOK-1");
    }
}
