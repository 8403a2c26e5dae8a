//! The fixed list of items the store sells.

use crate::price::Price;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub image: &'static str,
}

static ITEMS: [CatalogItem; 6] = [
    CatalogItem {
        id: 1,
        title: "Smartphone Premium",
        description: "Smartphone de última geração com câmera de alta resolução e bateria de longa duração.",
        price: Price::from_cents(199999),
        image: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=600&auto=format&fit=crop",
    },
    CatalogItem {
        id: 2,
        title: "Notebook Ultrafino",
        description: "Notebook leve e potente para trabalho e entretenimento.",
        price: Price::from_cents(359999),
        image: "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=600&auto=format&fit=crop",
    },
    CatalogItem {
        id: 3,
        title: "Fones de Ouvido Sem Fio",
        description: "Fones com cancelamento de ruído e qualidade de áudio excepcional.",
        price: Price::from_cents(49999),
        image: "https://images.unsplash.com/photo-1572536147248-ac59a8abfa4b?w=600&auto=format&fit=crop",
    },
    CatalogItem {
        id: 4,
        title: "Relógio Inteligente",
        description: "Monitore sua saúde e receba notificações diretamente no seu pulso.",
        price: Price::from_cents(89999),
        image: "https://images.unsplash.com/photo-1579586337278-3befd40fd17a?w=600&auto=format&fit=crop",
    },
    CatalogItem {
        id: 5,
        title: "Caixa de Som Portátil",
        description: "Som potente e resistente à água para suas aventuras.",
        price: Price::from_cents(34999),
        image: "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=600&auto=format&fit=crop",
    },
    CatalogItem {
        id: 6,
        title: "Câmera Digital Profissional",
        description: "Captura momentos especiais com altíssima qualidade.",
        price: Price::from_cents(279999),
        image: "https://images.unsplash.com/photo-1516035069371-29a1b244cc32?w=600&auto=format&fit=crop",
    },
];

/// All purchasable items, in display order.
pub fn items() -> &'static [CatalogItem] {
    &ITEMS
}

/// Looks up a catalog item by its id.
pub fn find(id: u32) -> Option<&'static CatalogItem> {
    ITEMS.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<u32> = items().iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), items().len());
    }

    #[test]
    fn can_find_item_by_id() {
        let item = find(3).unwrap();
        assert_eq!(item.title, "Fones de Ouvido Sem Fio");
        assert_eq!(item.price, Price::from_cents(49999));
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert!(find(42).is_none());
    }
}
