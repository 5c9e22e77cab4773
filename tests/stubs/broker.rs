#![allow(dead_code)]
// Just enough MQTT 3.1.1 to accept a client, acknowledge QoS 1 publishes and record them

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

const CONNECT: u8 = 1;
const PUBLISH: u8 = 3;
const PINGREQ: u8 = 12;
const DISCONNECT: u8 = 14;

const CONNACK: [u8; 4] = [0x20, 0x02, 0x00, 0x00];
const PINGRESP: [u8; 2] = [0xd0, 0x00];

#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
}

/// Serve `connections` client sessions one after another on a random local port
pub fn spawn_broker(connections: usize) -> (u16, JoinHandle<Vec<Published>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let mut published = Vec::new();
        for _ in 0..connections {
            let (stream, _) = listener.accept().unwrap();
            serve(stream, &mut published).unwrap();
        }
        published
    });

    (port, handle)
}

fn serve(mut stream: TcpStream, published: &mut Vec<Published>) -> io::Result<()> {
    while let Some((header, body)) = read_packet(&mut stream)? {
        match header >> 4 {
            CONNECT => stream.write_all(&CONNACK)?,
            PUBLISH => {
                let qos = (header >> 1) & 0x03;
                let topic_len = u16::from_be_bytes([body[0], body[1]]) as usize;
                let topic = String::from_utf8_lossy(&body[2..2 + topic_len]).to_string();
                let mut rest = &body[2 + topic_len..];
                if qos > 0 {
                    stream.write_all(&[0x40, 0x02, rest[0], rest[1]])?;
                    rest = &rest[2..];
                }
                published.push(Published {
                    topic,
                    payload: String::from_utf8_lossy(rest).to_string(),
                    retain: header & 0x01 == 1,
                });
            }
            PINGREQ => stream.write_all(&PINGRESP)?,
            DISCONNECT => break,
            _ => (),
        }
    }
    Ok(())
}

/// `None` once the client has closed the connection
fn read_packet(stream: &mut TcpStream) -> io::Result<Option<(u8, Vec<u8>)>> {
    let mut header = [0u8; 1];
    match stream.read(&mut header) {
        Ok(0) => return Ok(None),
        Ok(_) => (),
        Err(e) if e.kind() == io::ErrorKind::ConnectionReset => return Ok(None),
        Err(e) => return Err(e),
    }

    let mut remaining = 0usize;
    let mut multiplier = 1usize;
    loop {
        let mut byte = [0u8; 1];
        stream.read_exact(&mut byte)?;
        remaining += (byte[0] & 0x7f) as usize * multiplier;
        if byte[0] & 0x80 == 0 {
            break;
        }
        multiplier *= 128;
    }

    let mut body = vec![0u8; remaining];
    stream.read_exact(&mut body)?;
    Ok(Some((header[0], body)))
}
