// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;

use crate::{
    common::error::AppError,
    models::{
        checklist::{Checklist, ChecklistAnswer},
        equipment::Equipment,
    },
    scanner::equipment_qr_text,
    services::checklist_service,
};

const FONT_FAMILY: &str = "Roboto";

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: String,
    public_base_url: String,
}

impl DocumentService {
    pub fn new(fonts_dir: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Etiqueta QR do equipamento em PNG.
    pub fn qr_label_png(&self, equipment: &Equipment) -> Result<Vec<u8>, AppError> {
        let text = equipment_qr_text(equipment, &self.public_base_url);

        let code = QrCode::new(text.as_bytes())
            .map_err(|e| AppError::Document(format!("QR code: {}", e)))?;

        let image_buffer = code
            .render::<Luma<u8>>()
            .min_dimensions(256, 256)
            .build();
        let dynamic_image = DynamicImage::ImageLuma8(image_buffer);

        let mut buffer = Vec::new();
        dynamic_image
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .map_err(|e| AppError::Document(format!("PNG: {}", e)))?;

        tracing::debug!(equipment_id = equipment.id, bytes = buffer.len(), "Etiqueta QR gerada");
        Ok(buffer)
    }

    /// Impressão do checklist NR12.
    pub fn checklist_pdf(&self, checklist: &Checklist) -> Result<Vec<u8>, AppError> {
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, FONT_FAMILY, None)
            .map_err(|_| AppError::Document(format!("Fonte {} não encontrada em {}", FONT_FAMILY, self.fonts_dir)))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Checklist NR12 #{}", checklist.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(elements::Paragraph::new(format!("CHECKLIST NR12 #{}", checklist.id))
            .styled(style::Style::new().bold().with_font_size(16)));

        let equipamento = checklist
            .equipamento_nome
            .clone()
            .unwrap_or_else(|| format!("Equipamento #{}", checklist.equipamento));
        doc.push(elements::Paragraph::new(format!("Equipamento: {}", equipamento)));

        if let Some(modelo) = &checklist.modelo_nome {
            doc.push(elements::Paragraph::new(format!("Modelo: {}", modelo)));
        }
        if let Some(operador) = &checklist.operador_nome {
            doc.push(elements::Paragraph::new(format!("Operador: {}", operador)));
        }
        if let Some(horimetro) = checklist.horimetro {
            doc.push(elements::Paragraph::new(format!("Horímetro: {}", horimetro.normalize())));
        }
        if let Some(inicio) = checklist.data_inicio {
            doc.push(elements::Paragraph::new(format!("Início: {}", inicio.format("%d/%m/%Y %H:%M"))));
        }
        if let Some(fim) = checklist.data_conclusao {
            doc.push(elements::Paragraph::new(format!("Conclusão: {}", fim.format("%d/%m/%Y %H:%M"))));
        }

        doc.push(elements::Break::new(1.5));

        // --- ITENS ---
        // Pesos: Pergunta (5), Resposta (2), Observação (3)
        let mut table = elements::TableLayout::new(vec![5, 2, 3]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table.row()
            .element(elements::Paragraph::new("Item").styled(style_bold))
            .element(elements::Paragraph::new("Resposta").styled(style_bold))
            .element(elements::Paragraph::new("Observação").styled(style_bold))
            .push()
            .map_err(|e| AppError::Document(e.to_string()))?;

        for item in &checklist.itens {
            let pergunta = match &item.categoria {
                Some(categoria) => format!("[{}] {}", categoria, item.pergunta),
                None => item.pergunta.clone(),
            };
            table.row()
                .element(elements::Paragraph::new(pergunta))
                .element(elements::Paragraph::new(answer_label(item.resposta)))
                .element(elements::Paragraph::new(item.observacao.clone().unwrap_or_default()))
                .push()
                .map_err(|e| AppError::Document(e.to_string()))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(1.5));

        // --- NÃO CONFORMIDADES ---
        let pendencias = non_conformity_lines(checklist);
        if !pendencias.is_empty() {
            doc.push(elements::Paragraph::new("NÃO CONFORMIDADES")
                .styled(style::Style::new().bold().with_font_size(12)));
            for line in pendencias {
                doc.push(elements::Paragraph::new(line));
            }
            doc.push(elements::Break::new(1.5));
        }

        // --- RESUMO ---
        let stats = checklist_service::stats_for_checklist(checklist);
        doc.push(elements::Paragraph::new(format!(
            "Respostas: {}  |  Não conformidades: {}",
            stats.total_respostas, stats.total_nao_conformidades
        )));

        let mut rate = elements::Paragraph::new(format!("CONFORMIDADE: {}%", stats.conformity_rate));
        rate.set_alignment(genpdf::Alignment::Right);
        doc.push(rate.styled(style::Style::new().bold().with_font_size(12)));

        doc.push(elements::Break::new(3));
        doc.push(elements::Paragraph::new("_______________________________________"));
        doc.push(elements::Paragraph::new("Responsável pela inspeção")
            .styled(style::Style::new().italic().with_font_size(8)));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::Document(e.to_string()))?;

        tracing::debug!(checklist_id = checklist.id, bytes = buffer.len(), "PDF do checklist gerado");
        Ok(buffer)
    }
}

/// Uma linha por item não conforme, com a observação quando houver.
fn non_conformity_lines(checklist: &Checklist) -> Vec<String> {
    checklist_service::non_conformities(checklist)
        .into_iter()
        .map(|item| match item.observacao.as_deref().filter(|o| !o.trim().is_empty()) {
            Some(obs) => format!("- {}: {}", item.pergunta, obs),
            None => format!("- {}", item.pergunta),
        })
        .collect()
}

fn answer_label(answer: Option<ChecklistAnswer>) -> &'static str {
    match answer {
        Some(ChecklistAnswer::Conforme) => "Conforme",
        Some(ChecklistAnswer::NaoConforme) => "Não conforme",
        Some(ChecklistAnswer::NaoAplicavel) => "N/A",
        None => "-",
    }
}
