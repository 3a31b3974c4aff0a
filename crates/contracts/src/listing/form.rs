use uuid::Uuid;

use super::{
    ExtraImage, ProductDraft, ProductField, ProductPayload, ProductSeed, VariationDraft,
    VariationField,
};

/// Why a generation submit is refused before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionBlocker {
    /// No Amazon .xlsm template chosen.
    MissingTemplate,
    /// The product list is empty.
    NoProducts,
}

impl SubmissionBlocker {
    pub fn message(self) -> &'static str {
        match self {
            SubmissionBlocker::MissingTemplate => {
                "Por favor, envie o modelo de planilha da Amazon (.xlsm)."
            }
            SubmissionBlocker::NoProducts => {
                "Adicione ao menos um produto antes de gerar a planilha."
            }
        }
    }
}

/// The editable product collection behind the "Criar Listing" page.
///
/// All operations are synchronous and touch only the targeted record; the
/// rest of the collection keeps its order and its values, which is what the
/// keyed rendering in the view relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm<F> {
    pub products: Vec<ProductDraft<F>>,
}

impl<F> ListingForm<F> {
    /// Starts with one blank product, like the page does.
    pub fn new() -> Self {
        Self {
            products: vec![ProductDraft::new()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn product_mut(&mut self, id: Uuid) -> Option<&mut ProductDraft<F>> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn add_product(&mut self) -> Uuid {
        let draft = ProductDraft::new();
        let id = draft.id;
        self.products.push(draft);
        id
    }

    pub fn remove_product(&mut self, id: Uuid) {
        self.products.retain(|p| p.id != id);
    }

    pub fn set_product_field(&mut self, id: Uuid, field: ProductField, value: String) {
        if let Some(product) = self.product_mut(id) {
            product.fields.set(field, value);
        }
    }

    pub fn add_variation(&mut self, product_id: Uuid) -> Option<Uuid> {
        let product = self.product_mut(product_id)?;
        let variation = VariationDraft::new();
        let id = variation.id;
        product.variacoes.push(variation);
        Some(id)
    }

    pub fn remove_variation(&mut self, product_id: Uuid, variation_id: Uuid) {
        if let Some(product) = self.product_mut(product_id) {
            product.variacoes.retain(|v| v.id != variation_id);
        }
    }

    pub fn set_variation_field(
        &mut self,
        product_id: Uuid,
        variation_id: Uuid,
        field: VariationField,
        value: String,
    ) {
        if let Some(product) = self.product_mut(product_id) {
            if let Some(variation) = product.variacoes.iter_mut().find(|v| v.id == variation_id) {
                variation.set(field, value);
            }
        }
    }

    pub fn set_principal_image(&mut self, product_id: Uuid, file: Option<F>) {
        if let Some(product) = self.product_mut(product_id) {
            product.imagens.principal = file;
        }
    }

    pub fn set_amostra_image(&mut self, product_id: Uuid, file: Option<F>) {
        if let Some(product) = self.product_mut(product_id) {
            product.imagens.amostra = file;
        }
    }

    pub fn add_extra_image(&mut self, product_id: Uuid) -> Option<Uuid> {
        let product = self.product_mut(product_id)?;
        let slot = ExtraImage::new();
        let id = slot.id;
        product.imagens.extra.push(slot);
        Some(id)
    }

    pub fn remove_extra_image(&mut self, product_id: Uuid, image_id: Uuid) {
        if let Some(product) = self.product_mut(product_id) {
            product.imagens.extra.retain(|img| img.id != image_id);
        }
    }

    pub fn set_extra_image_file(&mut self, product_id: Uuid, image_id: Uuid, file: Option<F>) {
        if let Some(product) = self.product_mut(product_id) {
            if let Some(slot) = product.imagens.extra.iter_mut().find(|img| img.id == image_id) {
                slot.file = file;
            }
        }
    }

    /// Replaces the whole collection from an upstream list, assigning fresh
    /// local ids. An empty list leaves one blank product so the page never
    /// renders without a form.
    pub fn hydrate(&mut self, seeds: Vec<ProductSeed>) {
        if seeds.is_empty() {
            self.products = vec![ProductDraft::new()];
        } else {
            self.products = seeds.into_iter().map(ProductDraft::from_seed).collect();
        }
    }

    /// Gate before `gerar-planilha/`: the submit must not leave the client
    /// without a template or with nothing to fill it with. The template
    /// check comes first, like the page always reported it.
    pub fn check_submission(&self, has_template: bool) -> Result<(), SubmissionBlocker> {
        if !has_template {
            return Err(SubmissionBlocker::MissingTemplate);
        }
        if self.is_empty() {
            return Err(SubmissionBlocker::NoProducts);
        }
        Ok(())
    }

    /// The `products_data` entries for submission: fields and variations,
    /// images stripped (they go as separate multipart parts).
    pub fn submission_products(&self) -> Vec<ProductPayload<'_>> {
        self.products
            .iter()
            .map(|p| ProductPayload {
                fields: &p.fields,
                variacoes: &p.variacoes,
            })
            .collect()
    }
}

impl<F> Default for ListingForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Suggests a variation SKU from the parent product's SKU, e.g.
/// `CAN-1-VAR2-0481`. `salt` is time-derived at the call site.
pub fn generate_variation_sku(parent_sku: &str, index: usize, salt: u64) -> String {
    let parent = if parent_sku.is_empty() {
        "PRODUTO"
    } else {
        parent_sku
    };
    format!("{}-VAR{}-{:04}", parent, index + 1, salt % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{ProductFields, VariationKind, VariationSeed};

    type Form = ListingForm<String>;

    fn form_with(n: usize) -> Form {
        let mut form = Form::new();
        form.products.clear();
        for _ in 0..n {
            form.add_product();
        }
        form
    }

    #[test]
    fn test_starts_with_one_blank_product() {
        let form = Form::new();
        assert_eq!(form.products.len(), 1);
        assert!(form.products[0].fields.titulo.is_empty());
        assert!(form.products[0].imagens.principal.is_none());
    }

    #[test]
    fn test_remove_preserves_order_and_untouched_records() {
        let mut form = form_with(3);
        let ids: Vec<_> = form.products.iter().map(|p| p.id).collect();
        form.set_product_field(ids[0], ProductField::Titulo, "primeiro".into());
        form.set_product_field(ids[2], ProductField::Titulo, "terceiro".into());

        let first = form.products[0].clone();
        let third = form.products[2].clone();

        form.remove_product(ids[1]);

        assert_eq!(form.products.len(), 2);
        assert_eq!(form.products[0], first);
        assert_eq!(form.products[1], third);
        assert_eq!(
            form.products.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![ids[0], ids[2]]
        );
    }

    #[test]
    fn test_field_edit_touches_only_target() {
        let mut form = form_with(2);
        let ids: Vec<_> = form.products.iter().map(|p| p.id).collect();
        let other = form.products[1].clone();

        form.set_product_field(ids[0], ProductField::Preco, "39.90".into());

        assert_eq!(form.products[0].fields.preco, "39.90");
        assert_eq!(form.products[1], other);
    }

    #[test]
    fn test_local_ids_are_unique() {
        let form = form_with(50);
        let mut ids: Vec<_> = form.products.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_variation_lifecycle() {
        let mut form = Form::new();
        let pid = form.products[0].id;

        let vid = form.add_variation(pid).unwrap();
        form.set_variation_field(pid, vid, VariationField::Tipo, "cor".into());
        form.set_variation_field(pid, vid, VariationField::Cor, "Azul".into());

        let variation = &form.products[0].variacoes[0];
        assert_eq!(variation.tipo, Some(VariationKind::Cor));
        assert_eq!(variation.cor, "Azul");

        // Clearing the select goes back to "none chosen".
        form.set_variation_field(pid, vid, VariationField::Tipo, String::new());
        assert_eq!(form.products[0].variacoes[0].tipo, None);

        form.remove_variation(pid, vid);
        assert!(form.products[0].variacoes.is_empty());
    }

    #[test]
    fn test_image_slots() {
        let mut form = Form::new();
        let pid = form.products[0].id;

        form.set_principal_image(pid, Some("principal.png".to_string()));
        form.set_amostra_image(pid, Some("amostra.png".to_string()));
        let slot_a = form.add_extra_image(pid).unwrap();
        let slot_b = form.add_extra_image(pid).unwrap();
        form.set_extra_image_file(pid, slot_b, Some("extra.png".to_string()));
        form.remove_extra_image(pid, slot_a);

        let imagens = &form.products[0].imagens;
        assert_eq!(imagens.principal.as_deref(), Some("principal.png"));
        assert_eq!(imagens.extra.len(), 1);
        assert_eq!(imagens.extra[0].id, slot_b);
        assert_eq!(imagens.extra[0].file.as_deref(), Some("extra.png"));
    }

    #[test]
    fn test_hydrate_assigns_fresh_ids_and_empty_slots() {
        let mut form = Form::new();
        let seeds = vec![
            ProductSeed {
                fields: ProductFields {
                    titulo: "Caneca".into(),
                    sku: "CAN-1".into(),
                    ..Default::default()
                },
                variacoes: vec![VariationSeed {
                    tipo: Some(VariationKind::Cor),
                    cor: "Azul".into(),
                    ..Default::default()
                }],
            },
            ProductSeed::default(),
        ];

        form.hydrate(seeds);

        assert_eq!(form.products.len(), 2);
        assert_eq!(form.products[0].fields.titulo, "Caneca");
        assert_eq!(form.products[0].variacoes.len(), 1);
        assert!(form.products[0].imagens.principal.is_none());
        assert!(form.products[0].imagens.extra.is_empty());
        assert_ne!(form.products[0].id, form.products[1].id);
    }

    #[test]
    fn test_hydrate_empty_falls_back_to_blank_product() {
        let mut form = form_with(3);
        form.hydrate(Vec::new());
        assert_eq!(form.products.len(), 1);
        assert!(form.products[0].fields.titulo.is_empty());
    }

    #[test]
    fn test_submission_payload_has_no_images_or_local_ids() {
        let mut form = Form::new();
        let pid = form.products[0].id;
        form.set_product_field(pid, ProductField::Titulo, "Caneca".into());
        form.set_principal_image(pid, Some("principal.png".to_string()));
        let vid = form.add_variation(pid).unwrap();
        form.set_variation_field(pid, vid, VariationField::Sku, "CAN-1-VAR1".into());

        let json = serde_json::to_value(form.submission_products()).unwrap();
        let entry = &json.as_array().unwrap()[0];
        assert_eq!(entry["titulo"], "Caneca");
        assert_eq!(entry["variacoes"][0]["sku"], "CAN-1-VAR1");
        assert!(entry.get("id").is_none());
        assert!(entry.get("imagens").is_none());
        assert!(entry["variacoes"][0].get("id").is_none());
    }

    #[test]
    fn test_submission_blocked_without_template() {
        let form = Form::new();
        assert_eq!(
            form.check_submission(false),
            Err(SubmissionBlocker::MissingTemplate)
        );

        // The template check wins even when the product list is also empty.
        let mut empty = Form::new();
        let id = empty.products[0].id;
        empty.remove_product(id);
        assert_eq!(
            empty.check_submission(false),
            Err(SubmissionBlocker::MissingTemplate)
        );
    }

    #[test]
    fn test_submission_blocked_without_products() {
        let mut form = Form::new();
        let id = form.products[0].id;
        form.remove_product(id);
        assert_eq!(
            form.check_submission(true),
            Err(SubmissionBlocker::NoProducts)
        );
    }

    #[test]
    fn test_submission_allowed_with_template_and_products() {
        assert_eq!(Form::new().check_submission(true), Ok(()));
    }

    #[test]
    fn test_generate_variation_sku() {
        assert_eq!(generate_variation_sku("CAN-1", 1, 123_456), "CAN-1-VAR2-3456");
        assert_eq!(generate_variation_sku("", 0, 7), "PRODUTO-VAR1-0007");
    }
}
