// src/services/export_service.rs

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
    common::{error::AppError, money::format_decimal_2},
    models::{
        diamond_wire::CutRecord,
        finance::DelinquencyRow,
        inventory::StockPosition,
    },
    services::diamond_wire_service::{cut_area, wire_wear},
};

const BOM: &[u8] = "\u{FEFF}".as_bytes();

/// CSV para download: BOM UTF-8, todos os campos entre aspas, linhas com `\n`.
pub fn to_csv<I>(headers: &[&str], rows: I) -> Result<Vec<u8>, AppError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(BOM.to_vec());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Csv(csv::Error::from(e.into_error())))
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn stock_position_csv(position: &StockPosition) -> Result<Vec<u8>, AppError> {
    to_csv(
        &["Código", "Descrição", "Unidade", "Quantidade", "Custo Médio", "Valor Total", "Abaixo do Mínimo"],
        position.rows.iter().map(|r| {
            vec![
                opt(&r.codigo),
                r.descricao.clone(),
                opt(&r.unidade),
                r.quantidade.normalize().to_string(),
                format_decimal_2(r.custo_medio),
                format_decimal_2(r.valor_total),
                if r.abaixo_minimo { "Sim" } else { "Não" }.to_string(),
            ]
        }),
    )
}

pub fn cut_records_csv(cuts: &[CutRecord]) -> Result<Vec<u8>, AppError> {
    to_csv(
        &[
            "Data", "Fio", "Equipamento", "Bloco", "Comprimento (m)", "Altura (m)", "Área (m²)",
            "Diâmetro Inicial (mm)", "Diâmetro Final (mm)", "Desgaste (mm)", "Operador",
        ],
        cuts.iter().map(|c| {
            vec![
                c.data.format("%d/%m/%Y").to_string(),
                c.fio_codigo.clone().unwrap_or_else(|| c.fio.to_string()),
                opt(&c.equipamento_nome),
                opt(&c.bloco),
                format_decimal_2(c.comprimento_m),
                format_decimal_2(c.altura_m),
                format_decimal_2(cut_area(c)),
                format_decimal_2(c.diametro_inicial_mm),
                format_decimal_2(c.diametro_final_mm),
                format_decimal_2(wire_wear(c)),
                opt(&c.operador_nome),
            ]
        }),
    )
}

pub fn delinquency_csv(rows: &[DelinquencyRow]) -> Result<Vec<u8>, AppError> {
    to_csv(
        &["Cliente", "Títulos", "Total em Aberto", "Maior Atraso (dias)", "Vencimento Mais Antigo"],
        rows.iter().map(|r| {
            vec![
                r.cliente_nome.clone(),
                r.titulos.to_string(),
                format_decimal_2(r.total_em_aberto),
                r.maior_atraso_dias.to_string(),
                r.vencimento_mais_antigo.format("%d/%m/%Y").to_string(),
            ]
        }),
    )
}
